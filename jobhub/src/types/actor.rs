use serde::{Deserialize, Serialize};

/// Group claim that grants access to the admin view.
pub const ADMIN_GROUP: &str = "ADMIN";

/// The authenticated caller as resolved from the identity provider.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Actor {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub attributes: ActorAttributes,
    #[serde(default)]
    pub groups: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ActorAttributes {
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub phone_number: Option<String>,
    /// Preferred category ids. `None` when the user never set any.
    pub job_preferences: Option<Vec<String>>,
}

impl Actor {
    pub fn is_admin(&self) -> bool {
        self.groups.iter().any(|group| group == ADMIN_GROUP)
    }

    /// First preferred category, used as the seeker board's default filter.
    pub fn preferred_category(&self) -> Option<&str> {
        self.attributes.job_preferences.as_ref()?.iter().map(String::as_str).find(|id| !id.trim().is_empty())
    }

    /// "Given Family", falling back to the email when no name is known.
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [self.attributes.given_name.as_deref(), self.attributes.family_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();

        if parts.is_empty() {
            self.email.clone()
        } else {
            parts.join(" ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(groups: &[&str], preferences: Option<Vec<&str>>) -> Actor {
        Actor {
            id: "user-1".to_string(),
            email: "user@example.com".to_string(),
            attributes: ActorAttributes {
                given_name: Some("Ada".to_string()),
                family_name: None,
                phone_number: None,
                job_preferences: preferences.map(|p| p.into_iter().map(str::to_string).collect()),
            },
            groups: groups.iter().map(|g| g.to_string()).collect(),
        }
    }

    #[test]
    fn admin_requires_exact_group() {
        assert!(actor(&["USERS", "ADMIN"], None).is_admin());
        assert!(!actor(&["admin"], None).is_admin());
        assert!(!actor(&[], None).is_admin());
    }

    #[test]
    fn preferred_category_skips_blank_entries() {
        assert_eq!(actor(&[], Some(vec!["", "cat-2", "cat-3"])).preferred_category(), Some("cat-2"));
        assert_eq!(actor(&[], Some(vec![])).preferred_category(), None);
        assert_eq!(actor(&[], None).preferred_category(), None);
    }

    #[test]
    fn display_name_falls_back_to_email() {
        assert_eq!(actor(&[], None).display_name(), "Ada");
        let mut anonymous = actor(&[], None);
        anonymous.attributes.given_name = None;
        assert_eq!(anonymous.display_name(), "user@example.com");
    }
}
