use std::{borrow::Cow, fmt};

/// Hex dump of a MIDI buffer for logs and error messages.
#[derive(Debug)]
pub struct Displayable<'a>(Cow<'a, [u8]>);

impl<'a> From<&'a [u8]> for Displayable<'a> {
    fn from(msg: &'a [u8]) -> Self {
        Self(Cow::Borrowed(msg))
    }
}

impl From<Vec<u8>> for Displayable<'static> {
    fn from(msg: Vec<u8>) -> Self {
        Self(Cow::Owned(msg))
    }
}

impl<'a> Displayable<'a> {
    pub fn to_owned(&self) -> Displayable<'static> {
        Displayable::from(self.0.to_vec())
    }
}

impl<'a> fmt::Display for Displayable<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut iter = self.0.iter();

        match iter.next() {
            Some(first) => write!(f, "[{first:02x}")?,
            None => return f.write_str("[]"),
        };

        for val in iter {
            write!(f, " {val:02x}")?;
        }

        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::Displayable;

    #[test]
    fn hex_dump() {
        let buf = [0xf0, 0x00, 0x20, 0x6b, 0xf7];
        assert_eq!(
            Displayable::from(buf.as_slice()).to_string(),
            "[f0 00 20 6b f7]"
        );
        assert_eq!(Displayable::from(Vec::<u8>::new()).to_string(), "[]");
    }
}
