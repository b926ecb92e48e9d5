pub const U8_BYTES: usize = 1;
pub const U32_BYTES: usize = 4;

/// Generates a reader for a big-endian integer on a type holding a `reader: impl Read`.
///
/// The value is assembled most significant byte first, independent of the host.
#[macro_export]
macro_rules! read {
    ($name:ident, $type:ty, $width:expr) => {
        fn $name(&mut self, context: &'static str) -> Result<$type, $crate::qoi::QoiError> {
            let bytes = self.read_array::<{ $width }>(context)?;

            Ok(<$type>::from_be_bytes(bytes))
        }
    };
}

#[macro_export]
macro_rules! read_array {
    () => {
        fn read_array<const N: usize>(
            &mut self,
            context: &'static str,
        ) -> Result<[u8; N], $crate::qoi::QoiError> {
            let mut buf = [0_u8; N];

            std::io::Read::read_exact(&mut self.reader, &mut buf)
                .map_err(|err| $crate::qoi::QoiError::from_read(err, context))?;

            Ok(buf)
        }
    };
}
