//! Little-endian byte-level serialization for the primitive widths the wire
//! format carries.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Result as IoResult, Write};

pub trait ToBytes {
    /// Serializes `self` into `writer`.
    fn write<W: Write>(&self, writer: W) -> IoResult<()>;
}

pub trait FromBytes: Sized {
    /// Reads `Self` from `reader`.
    fn read<R: Read>(reader: R) -> IoResult<Self>;
}

impl ToBytes for u8 {
    #[inline]
    fn write<W: Write>(&self, mut writer: W) -> IoResult<()> {
        writer.write_u8(*self)
    }
}

impl FromBytes for u8 {
    #[inline]
    fn read<R: Read>(mut reader: R) -> IoResult<Self> {
        reader.read_u8()
    }
}

macro_rules! integer_bytes {
    ($t:ty, $write:ident, $read:ident) => {
        impl ToBytes for $t {
            #[inline]
            fn write<W: Write>(&self, mut writer: W) -> IoResult<()> {
                writer.$write::<LittleEndian>(*self)
            }
        }

        impl FromBytes for $t {
            #[inline]
            fn read<R: Read>(mut reader: R) -> IoResult<Self> {
                reader.$read::<LittleEndian>()
            }
        }
    };
}

integer_bytes!(u16, write_u16, read_u16);
integer_bytes!(u32, write_u32, read_u32);
integer_bytes!(u64, write_u64, read_u64);
integer_bytes!(i16, write_i16, read_i16);
integer_bytes!(i32, write_i32, read_i32);
integer_bytes!(i64, write_i64, read_i64);

macro_rules! array_bytes {
    ($N:expr) => {
        impl ToBytes for [u64; $N] {
            #[inline]
            fn write<W: Write>(&self, mut writer: W) -> IoResult<()> {
                for num in self {
                    writer.write_u64::<LittleEndian>(*num)?;
                }
                Ok(())
            }
        }

        impl FromBytes for [u64; $N] {
            #[inline]
            fn read<R: Read>(mut reader: R) -> IoResult<Self> {
                let mut res = [0u64; $N];
                reader.read_u64_into::<LittleEndian>(&mut res)?;
                Ok(res)
            }
        }
    };
}

array_bytes!(1);
array_bytes!(2);
array_bytes!(4);
