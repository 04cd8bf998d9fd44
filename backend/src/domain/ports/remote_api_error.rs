//! Error shared by the Link and Copilot driven ports.

use super::define_port_error;

define_port_error! {
    /// Failures surfaced while calling a remote REST API.
    pub enum RemoteApiError {
        /// Network transport failed before a response arrived.
        Transport { message: String } =>
            "remote api transport failed: {message}",
        /// The configured request timeout elapsed.
        Timeout { message: String } =>
            "remote api timeout: {message}",
        /// The remote answered with a non-success status.
        HttpStatus { status: u16, body: String } =>
            "remote api returned status {status}: {body}",
        /// The response body did not match the expected shape.
        Decode { message: String } =>
            "remote api response decode failed: {message}",
        /// The adapter refused to build the request.
        InvalidRequest { message: String } =>
            "remote api request invalid: {message}",
    }
}

impl RemoteApiError {
    /// HTTP status carried by the error, if the remote answered at all.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the remote reported the resource as missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(RemoteApiError::http_status(404_u16, "missing"), true)]
    #[case(RemoteApiError::http_status(409_u16, "exists"), false)]
    #[case(RemoteApiError::transport("connection reset"), false)]
    fn only_404_counts_as_not_found(#[case] error: RemoteApiError, #[case] expected: bool) {
        assert_eq!(error.is_not_found(), expected);
    }

    #[test]
    fn status_errors_render_status_and_body() {
        let error = RemoteApiError::http_status(503_u16, "down");
        assert_eq!(error.to_string(), "remote api returned status 503: down");
        assert_eq!(error.status_code(), Some(503));
    }
}
