use std::fmt::Display;

use crate::errors::ConversionError;

/// Account name, non-empty and at most [`Username::MAX_LENGTH`] characters
///
/// Existing accounts are taken as typed, only new accounts are held to the
/// backend's character rule (see [`Username::new_account`]).
#[derive(
    Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    pub const MAX_LENGTH: usize = 150;

    fn is_allowed(c: char) -> bool {
        c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_')
    }

    /// Name for an account that is about to be created, letters, digits and
    /// `@.+-_` only
    pub fn new_account(value: &str) -> Result<Self, ConversionError> {
        let result = Self::try_from(value)?;
        if let Some(c) = value.chars().find(|c| !Self::is_allowed(*c)) {
            return Err(ConversionError::IllegalCharacter(c));
        }
        Ok(result)
    }

    fn check(value: &str) -> Result<(), ConversionError> {
        if value.is_empty() {
            return Err(ConversionError::Empty);
        }
        match value.chars().count() {
            actual if actual > Self::MAX_LENGTH => Err(ConversionError::MaxExceeded {
                max: Self::MAX_LENGTH,
                actual,
            }),
            _ => Ok(()),
        }
    }
}

impl TryFrom<String> for Username {
    type Error = ConversionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::check(&value)?;
        Ok(Self(value))
    }
}

impl TryFrom<&str> for Username {
    type Error = ConversionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::check(value)?;
        Ok(Self(value.to_string()))
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::empty("", ConversionError::Empty)]
    #[case::too_long("a".repeat(151), ConversionError::MaxExceeded{max:150, actual:151})]
    fn illegal_username(#[case] name: String, #[case] expect: ConversionError) {
        // Act
        let actual: Result<Username, ConversionError> = name.try_into();

        // Assert
        assert_eq!(actual.unwrap_err(), expect);
    }

    #[rstest]
    #[case::space("john doe", ConversionError::IllegalCharacter(' '))]
    #[case::slash("site/admin", ConversionError::IllegalCharacter('/'))]
    #[case::empty("", ConversionError::Empty)]
    fn illegal_new_account_name(#[case] name: &str, #[case] expect: ConversionError) {
        assert_eq!(Username::new_account(name).unwrap_err(), expect);
    }

    #[test]
    fn existing_account_names_are_taken_as_typed() {
        assert_eq!(Username::try_from("bob ").unwrap().as_ref(), "bob ");
    }

    #[rstest]
    #[case("john.doe")]
    #[case("site_manager-2")]
    #[case("ade+ops@construct.ng")]
    #[case(crate::const_config::client::CLIENT_RESTORED_USERNAME)]
    fn legal_new_account_name(#[case] name: &str) {
        assert_eq!(Username::new_account(name).unwrap().as_ref(), name);
    }
}
