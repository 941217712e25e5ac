use image::Rgba;

pub const NUM_COLOURS: usize = 16;

/// The fixed 16 colour EGA palette, as RGB triples.
pub const EGA_COLOURS: [ [ u8; 3 ]; NUM_COLOURS ] = [
    [ 0x00, 0x00, 0x00 ],
    [ 0x00, 0x00, 0xaa ],
    [ 0x00, 0xaa, 0x00 ],
    [ 0x00, 0xaa, 0xaa ],
    [ 0xaa, 0x00, 0x00 ],
    [ 0xaa, 0x00, 0xaa ],
    [ 0xaa, 0x55, 0x00 ],
    [ 0xaa, 0xaa, 0xaa ],
    [ 0x55, 0x55, 0x55 ],
    [ 0x55, 0x55, 0xff ],
    [ 0x55, 0xff, 0x55 ],
    [ 0x55, 0xff, 0xff ],
    [ 0xff, 0x55, 0x55 ],
    [ 0xff, 0x55, 0xff ],
    [ 0xff, 0xff, 0x55 ],
    [ 0xff, 0xff, 0xff ],
];

pub const TRANSPARENT: Rgba<u8> = Rgba([ 0, 0, 0, 0 ]);

/// Opaque colour for a palette index; only the low nibble is used.
pub fn ega_colour(index: u8) -> Rgba<u8> {
    let [ r, g, b ] = EGA_COLOURS[(index & 0xf) as usize];
    Rgba([ r, g, b, 0xff ])
}
