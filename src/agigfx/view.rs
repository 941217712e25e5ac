//! AGI VIEW resource structure.
//!
//! A view is a list of loops, each loop a list of cels. All offsets in the
//! resource are absolute, except cel header offsets which are relative to
//! the start of their loop.

use std::io::Cursor;

use packed_struct::prelude::*;

use crate::agires::{error::FormatError, source::ByteSource};

pub const MAX_LOOPS: usize = 255;
pub const MAX_CELS: usize = 255;

const NUM_LOOPS_OFFSET: u64 = 2;
const LOOP_OFFSETS_OFFSET: u64 = 5;

/// Packed cel info byte, following width and height in the cel header.
#[derive(PackedStruct)]
#[packed_struct(bit_numbering="msb0")]
pub struct CelInfo {
    #[packed_field(bits="0")]
    pub mirrored: bool,
    #[packed_field(bits="1..=3")]
    pub unmirrored_loop: Integer<u8, packed_bits::Bits::<3>>,
    #[packed_field(bits="4..=7")]
    pub transparency_color: Integer<u8, packed_bits::Bits::<4>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cel {
    pub header_offset: u16,
    pub data_offset: u64,
    pub width: u8,
    pub height: u8,
    pub transparency_color: u8,
    pub is_mirrored: bool,
    /// Loop holding the unflipped artwork; only meaningful if `is_mirrored`.
    pub unmirrored_loop_num: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loop {
    pub offset: u16,
    pub cels: Vec<Cel>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub loops: Vec<Loop>,
}

impl Cel {
    fn load<R: ByteSource + ?Sized>(rdr: &mut R, header_offset: u16) -> Result<Self, FormatError> {
        rdr.seek_absolute(header_offset.into())?;
        let width = rdr.read_byte()?;
        let height = rdr.read_byte()?;
        let info = CelInfo::unpack(&[ rdr.read_byte()? ]).map_err(FormatError::CelInfo)?;
        let data_offset = rdr.tell()?;

        Ok(Self{
            header_offset,
            data_offset,
            width,
            height,
            transparency_color: *info.transparency_color,
            is_mirrored: info.mirrored,
            unmirrored_loop_num: *info.unmirrored_loop,
        })
    }

    /// Whether this cel is drawn flipped when it appears in loop `loop_num`.
    pub fn is_flipped_in(&self, loop_num: usize) -> bool {
        self.is_mirrored && self.unmirrored_loop_num as usize != loop_num
    }
}

impl Loop {
    pub fn new(offset: u16, cels: Vec<Cel>) -> Result<Self, FormatError> {
        if cels.len() > MAX_CELS {
            return Err(FormatError::TooManyCels{ loop_num: 0, count: cels.len() });
        }
        Ok(Self{ offset, cels })
    }

    fn load<R: ByteSource + ?Sized>(rdr: &mut R, loop_num: usize, offset: u16) -> Result<Self, FormatError> {
        rdr.seek_absolute(offset.into())?;
        let num_cels = rdr.read_byte()?;

        let mut header_offsets = Vec::with_capacity(num_cels as usize);
        for _ in 0..num_cels {
            let rel_offset = rdr.read_word()?;
            // Offsets are 16 bit in the format; wrap like the interpreter does.
            header_offsets.push(offset.wrapping_add(rel_offset));
        }

        let mut cels = Vec::with_capacity(header_offsets.len());
        for (n, header_offset) in header_offsets.into_iter().enumerate() {
            let cel = Cel::load(rdr, header_offset)?;
            log::debug!("loop {} cel {}: header 0x{:04x} data 0x{:04x} {}x{} transparent {} mirrored {} (loop {})",
                loop_num, n, cel.header_offset, cel.data_offset, cel.width, cel.height,
                cel.transparency_color, cel.is_mirrored, cel.unmirrored_loop_num);
            cels.push(cel);
        }
        Ok(Self{ offset, cels })
    }

    pub fn num_cels(&self) -> usize {
        self.cels.len()
    }
}

impl View {
    pub fn new(loops: Vec<Loop>) -> Result<Self, FormatError> {
        if loops.len() > MAX_LOOPS {
            return Err(FormatError::TooManyLoops(loops.len()));
        }
        for (n, lop) in loops.iter().enumerate() {
            if lop.cels.len() > MAX_CELS {
                return Err(FormatError::TooManyCels{ loop_num: n, count: lop.cels.len() });
            }
        }
        Ok(Self{ loops })
    }

    /// Decodes the complete loop and cel structure. Pixel data is not read.
    pub fn load<R: ByteSource + ?Sized>(rdr: &mut R) -> Result<Self, FormatError> {
        rdr.seek_absolute(NUM_LOOPS_OFFSET)?;
        let num_loops = rdr.read_byte()?;

        rdr.seek_absolute(LOOP_OFFSETS_OFFSET)?;
        let mut loop_offsets = Vec::with_capacity(num_loops as usize);
        for _ in 0..num_loops {
            loop_offsets.push(rdr.read_word()?);
        }
        log::debug!("view has {} loops at {:04x?}", num_loops, loop_offsets);

        let mut loops = Vec::with_capacity(loop_offsets.len());
        for (n, offset) in loop_offsets.into_iter().enumerate() {
            loops.push(Loop::load(rdr, n, offset)?);
        }
        Ok(Self{ loops })
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, FormatError> {
        let mut rdr = Cursor::new(data);
        Self::load(&mut rdr)
    }

    pub fn num_loops(&self) -> usize {
        self.loops.len()
    }
}
