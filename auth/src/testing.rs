use async_trait::async_trait;

use crate::directory::AccountRecord;
use crate::directory::UserDirectory;
use crate::password::PasswordHasher;

#[derive(Debug, Clone)]
pub struct FakeUser {
    email: String,
    password_hash: String,
    confirmed: bool,
}

impl AccountRecord for FakeUser {
    fn email(&self) -> &str {
        &self.email
    }

    fn password_hash(&self) -> &str {
        &self.password_hash
    }

    fn is_confirmed(&self) -> bool {
        self.confirmed
    }
}

/// Directory backed by a fixed list of users.
#[derive(Debug, Default)]
pub struct FakeDirectory {
    users: Vec<FakeUser>,
    failing: bool,
}

impl FakeDirectory {
    pub fn failing() -> Self {
        Self {
            users: Vec::new(),
            failing: true,
        }
    }

    pub fn with_user(mut self, email: &str, password: &str, confirmed: bool) -> Self {
        let password_hash = PasswordHasher::new()
            .hash(password)
            .expect("Failed to hash password");
        self.users.push(FakeUser {
            email: email.to_string(),
            password_hash,
            confirmed,
        });
        self
    }
}

#[async_trait]
impl UserDirectory for FakeDirectory {
    type User = FakeUser;
    type Error = String;

    async fn find_by_email(&self, email: &str) -> Result<Option<FakeUser>, String> {
        if self.failing {
            return Err("connection refused".to_string());
        }
        Ok(self.users.iter().find(|u| u.email == email).cloned())
    }
}
