use super::Error;
use crate::bytes;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Msg(Box<[u8]>);

impl Msg {
    pub fn display(&self) -> bytes::Displayable {
        bytes::Displayable::from(self.0.as_ref())
    }

    pub fn new_sysex(data: &[u8]) -> Self {
        use super::sysex;

        let mut buf = Vec::with_capacity(data.len() + 2);

        buf.push(sysex::TAG);
        buf.extend(data);
        buf.push(sysex::END_TAG);

        Self(buf.into())
    }

    pub fn is_sysex(&self) -> bool {
        self.0.first() == Some(&super::sysex::TAG)
    }

    pub fn try_get_sysex_data(&self) -> Result<&[u8], Error> {
        use super::sysex;

        let (first, last) = match (self.0.first(), self.0.last()) {
            (Some(first), Some(last)) if self.0.len() >= 2 => (*first, *last),
            _ => return Err(Error::InvalidSysExInitTag(self.display().to_owned())),
        };

        if first != sysex::TAG {
            return Err(Error::InvalidSysExInitTag(self.display().to_owned()));
        }

        if last != sysex::END_TAG {
            return Err(Error::InvalidSysExFinalTag(self.display().to_owned()));
        }

        Ok(&self.0[1..self.0.len() - 1])
    }
}

impl<const S: usize> From<[u8; S]> for Msg {
    fn from(buf: [u8; S]) -> Self {
        Self(buf.into())
    }
}

impl From<&[u8]> for Msg {
    fn from(buf: &[u8]) -> Self {
        Self(buf.into())
    }
}

impl From<Vec<u8>> for Msg {
    fn from(buf: Vec<u8>) -> Self {
        Self(buf.into())
    }
}

impl std::ops::Deref for Msg {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}
