//! Random access byte reading over a resource.
//!
//! Anything that is `Read + Seek` is a [`ByteSource`]; in practice this is a
//! `Cursor` over the resource bytes, as the converter reads each file fully
//! before decoding it.

use std::io::{Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::agires::error::FormatError;

pub trait ByteSource: Read + Seek {
    fn tell(&mut self) -> Result<u64, FormatError> {
        self.stream_position().map_err(FormatError::Io)
    }

    fn seek_absolute(&mut self, offset: u64) -> Result<(), FormatError> {
        self.seek(SeekFrom::Start(offset)).map_err(FormatError::Io)?;
        Ok(())
    }

    fn read_byte(&mut self) -> Result<u8, FormatError> {
        let offset = self.tell()?;
        self.read_u8().map_err(|e| FormatError::from_read(e, offset))
    }

    fn read_word(&mut self) -> Result<u16, FormatError> {
        let offset = self.tell()?;
        self.read_u16::<LittleEndian>().map_err(|e| FormatError::from_read(e, offset))
    }

    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<(), FormatError> {
        let offset = self.tell()?;
        self.read_exact(buf).map_err(|e| FormatError::from_read(e, offset))
    }
}

impl<T: Read + Seek + ?Sized> ByteSource for T {}
