//! Request dispatch
//!
//! Maps a request method onto one of three fixed outcomes. The dispatcher
//! holds only the immutable [`FileBuffer`], so it can be invoked from any
//! number of connections at once without locking.

use hyper::body::Bytes;

use crate::loader::FileBuffer;

/// Body sent for every rejected request
pub const NOT_IMPLEMENTED_BODY: &[u8] = b"Not implemented\n";

/// Status sent for POST. 450 is intentional and kept for client compatibility.
pub const UPLOAD_REJECTED_STATUS: u16 = 450;

/// Status sent for any method other than GET and POST
pub const METHOD_REJECTED_STATUS: u16 = 451;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Download,
    UploadRejected,
    MethodRejected,
}

impl Outcome {
    /// Case-sensitive, exact match on the method as the engine reported it
    pub fn for_method(method: &str) -> Self {
        match method {
            "GET" => Self::Download,
            "POST" => Self::UploadRejected,
            _ => Self::MethodRejected,
        }
    }

    pub const fn status(self) -> u16 {
        match self {
            Self::Download => 200,
            Self::UploadRejected => UPLOAD_REJECTED_STATUS,
            Self::MethodRejected => METHOD_REJECTED_STATUS,
        }
    }
}

/// Where a response body lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodySource {
    /// Aliases the shared file buffer
    File,
    /// Points at a static constant
    Static,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOutcome {
    pub outcome: Outcome,
    pub status: u16,
    pub body: Bytes,
}

impl RequestOutcome {
    pub const fn body_source(&self) -> BodySource {
        match self.outcome {
            Outcome::Download => BodySource::File,
            Outcome::UploadRejected | Outcome::MethodRejected => BodySource::Static,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Dispatcher {
    file: FileBuffer,
}

impl Dispatcher {
    pub const fn new(file: FileBuffer) -> Self {
        Self { file }
    }

    pub const fn file(&self) -> &FileBuffer {
        &self.file
    }

    /// Decide the response for one request.
    ///
    /// The upload body is accepted but never inspected: POST is rejected
    /// whatever it carries.
    pub fn dispatch(&self, method: &str, _upload: &[u8]) -> RequestOutcome {
        let outcome = Outcome::for_method(method);
        let body = match outcome {
            Outcome::Download => self.file.bytes(),
            Outcome::UploadRejected | Outcome::MethodRejected => {
                Bytes::from_static(NOT_IMPLEMENTED_BODY)
            }
        };

        RequestOutcome {
            outcome,
            status: outcome.status(),
            body,
        }
    }
}
