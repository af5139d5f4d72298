use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

/// Column width of `name` and `email` in `user_model`
pub const MAX_FIELD_LEN: usize = 80;

/// A stored user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Storage-assigned identifier, never reused
    pub id: i32,
    pub name: String,
    pub email: String,
}

/// Raw `name`/`email` request arguments, as sent by the client.
///
/// Both are required by create, update and delete. Whitespace-only values
/// count as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate, ToSchema)]
pub struct UserArgs {
    #[validate(required(message = "Name cannot be blank"))]
    #[schema(example = "Alice")]
    pub name: Option<String>,

    #[validate(required(message = "email cannot be blank"))]
    #[schema(example = "a@x.com")]
    pub email: Option<String>,
}

impl UserArgs {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
        }
    }

    /// Drop blank values so that `required` rejects them.
    fn without_blanks(self) -> Self {
        Self {
            name: self.name.filter(|v| !v.trim().is_empty()),
            email: self.email.filter(|v| !v.trim().is_empty()),
        }
    }

    /// Validate the arguments into a complete [`NewUser`].
    ///
    /// Values are kept verbatim; only blank detection trims.
    pub fn into_new_user(self) -> Result<NewUser, ValidationErrors> {
        let args = self.without_blanks();
        args.validate()?;

        match (args.name, args.email) {
            (Some(name), Some(email)) => Ok(NewUser { name, email }),
            // unreachable once validate() passed
            _ => Err(ValidationErrors::new()),
        }
    }
}

/// A validated `name`/`email` pair, ready for insert or full replace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

impl NewUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}
