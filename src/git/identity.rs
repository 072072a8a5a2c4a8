/// An `Identity` is the name and e-mail address git records as the
/// author and committer of new commits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    name: String,
    email: String,
}

impl Identity {
    /// Creates a new identity.
    pub fn new<N: Into<String>, E: Into<String>>(name: N, email: E) -> Identity {
        Identity {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Returns the person's human-readable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the person's email address.
    pub fn email(&self) -> &str {
        &self.email
    }
}
