#[derive(Debug)]
pub enum Error {
    IO(std::io::Error, Option<String>),
    UnexpectedEndOfTokens(Option<String>),
    UnexpectedToken {
        token: String,
        index: usize,
        expected: &'static str,
    },
    MalformedNumber {
        token: String,
        index: usize,
    },
    UnknownChannel {
        token: String,
        index: usize,
    },
    UnbalancedBrace {
        index: usize,
    },
    FrameIndexOutOfRange {
        index: usize,
        frame_count: usize,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(format!("{:?}", self).as_ref())
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
