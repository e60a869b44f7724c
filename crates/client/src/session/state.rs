use std::fmt;

/// Lifecycle of a logical session
///
/// ```text
/// Anonymous --login/register--> Authenticated
/// Authenticated --401--> Refreshing --ok--> Authenticated
///                                  --fail--> Expired --acknowledged--> Anonymous
/// Authenticated --logout--> Anonymous
/// ```
///
/// A 401 on a request sent without any stored credential still fails with
/// [`ClientError::SessionExpired`](crate::ClientError::SessionExpired), but
/// the state stays `Anonymous`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    Anonymous,
    Authenticated,
    Refreshing,
    Expired,
}

impl SessionState {
    pub const fn is_authenticated(self) -> bool {
        matches!(self, Self::Authenticated | Self::Refreshing)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Anonymous => "anonymous",
            Self::Authenticated => "authenticated",
            Self::Refreshing => "refreshing",
            Self::Expired => "expired",
        })
    }
}
