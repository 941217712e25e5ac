//! Per-file conversion: read a VIEW resource, render it and write the image.

use std::ffi::OsString;
use std::fmt::Write as _;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbaImage};
use thiserror::Error;

use crate::agigfx::{compose, view::View};
use crate::agires::error::FormatError;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("could not open view file '{}': {source}", path.display())]
    SourceUnavailable { path: PathBuf, #[source] source: std::io::Error },

    #[error("'{}': {source}", path.display())]
    Format { path: PathBuf, #[source] source: FormatError },

    #[error("could not write '{}': {source}", path.display())]
    EncodeFailure { path: PathBuf, #[source] source: image::ImageError },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Bmp,
    Png,
}

impl OutputFormat {
    pub fn image_format(self) -> ImageFormat {
        match self {
            OutputFormat::Bmp => ImageFormat::Bmp,
            OutputFormat::Png => ImageFormat::Png,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Bmp => "bmp",
            OutputFormat::Png => "png",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub format: OutputFormat,
    /// Directory for output images; next to the input if unset.
    pub out_dir: Option<PathBuf>,
}

/// Output name is the input name with the format's extension appended, so
/// `VIEW.012` becomes `VIEW.012.bmp`.
pub fn output_path(view_path: &Path, options: &ExportOptions) -> PathBuf {
    let mut name: OsString = match &options.out_dir {
        Some(_) => view_path.file_name().map(OsString::from).unwrap_or_default(),
        None => view_path.as_os_str().to_owned(),
    };
    name.push(".");
    name.push(options.format.extension());
    match &options.out_dir {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}

/// Encodes fully in memory first; a failed write leaves no file behind.
pub fn save_image(img: &RgbaImage, path: &Path, format: OutputFormat) -> Result<(), ConvertError> {
    let encode_failure = |source| ConvertError::EncodeFailure{ path: path.to_path_buf(), source };

    let mut encoded = Cursor::new(Vec::new());
    img.write_to(&mut encoded, format.image_format()).map_err(encode_failure)?;

    if let Err(e) = std::fs::write(path, encoded.get_ref()) {
        let _ = std::fs::remove_file(path);
        return Err(encode_failure(image::ImageError::IoError(e)));
    }
    Ok(())
}

pub fn load_view(view_path: &Path) -> Result<(View, Vec<u8>), ConvertError> {
    let data = std::fs::read(view_path)
        .map_err(|source| ConvertError::SourceUnavailable{ path: view_path.to_path_buf(), source })?;
    let view = View::from_bytes(&data)
        .map_err(|source| ConvertError::Format{ path: view_path.to_path_buf(), source })?;
    Ok((view, data))
}

/// Converts one VIEW resource to an image and returns the path written.
pub fn convert_file(view_path: &Path, options: &ExportOptions) -> Result<PathBuf, ConvertError> {
    let (view, data) = load_view(view_path)?;
    let img = compose::compose(&view, &mut Cursor::new(&data))
        .map_err(|source| ConvertError::Format{ path: view_path.to_path_buf(), source })?;

    let out_path = output_path(view_path, options);
    save_image(&img, &out_path, options.format)?;
    log::info!("{}: {} loops, {}x{} image written to {}",
        view_path.display(), view.num_loops(), img.width(), img.height(), out_path.display());
    Ok(out_path)
}

/// Human readable dump of the loop and cel structure.
pub fn describe(view: &View) -> String {
    let mut out = String::new();
    let (width, height) = compose::canvas_size(view);
    let _ = writeln!(out, "{} loops, image {}x{}", view.num_loops(), width, height);
    for (loop_num, lop) in view.loops.iter().enumerate() {
        let (lw, lh) = compose::loop_extent(lop);
        let _ = writeln!(out, "  loop {:3} offset 0x{:04x} cels {:3} size {}x{}",
            loop_num, lop.offset, lop.num_cels(), lw, lh);
        for (cel_num, cel) in lop.cels.iter().enumerate() {
            let mirror = if cel.is_mirrored {
                format!(" mirror of loop {}{}", cel.unmirrored_loop_num,
                    if cel.is_flipped_in(loop_num) { " (flipped)" } else { "" })
            } else {
                String::new()
            };
            let _ = writeln!(out, "    cel {:3} header 0x{:04x} data 0x{:04x} {:3}x{:<3} transparent {:2}{}",
                cel_num, cel.header_offset, cel.data_offset, cel.width, cel.height, cel.transparency_color, mirror);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agigfx::view::tests::{build_view, CelSpec};

    #[test]
    fn output_next_to_input() {
        let options = ExportOptions::default();
        assert_eq!(output_path(Path::new("views/VIEW.012"), &options), PathBuf::from("views/VIEW.012.bmp"));
    }

    #[test]
    fn output_in_directory() {
        let options = ExportOptions{ format: OutputFormat::Png, out_dir: Some(PathBuf::from("out")) };
        assert_eq!(output_path(Path::new("views/VIEW.012"), &options), PathBuf::from("out/VIEW.012.png"));
    }

    #[test]
    fn describe_lists_cels() {
        let data = build_view(&[
            vec![ CelSpec{ width: 3, height: 2, info: 0x0f, rows: vec![ vec![], vec![] ] } ],
            vec![ CelSpec{ width: 3, height: 2, info: 0x8f, rows: vec![ vec![], vec![] ] } ],
        ]);
        let view = View::from_bytes(&data).unwrap();
        let text = describe(&view);
        assert!(text.starts_with("2 loops, image 6x4\n"));
        assert!(text.contains("loop   1"));
        assert!(text.contains("mirror of loop 0 (flipped)"));
        assert_eq!(text.lines().count(), 5);
    }
}
