use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HouseholdType {
    Apartment,
    House,
    Villa,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub household_type: HouseholdType,
    pub address: String,
    pub resident_count: u32,
    /// Income bracket label used for subsidy eligibility
    pub income_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Sparse set of profile fields; `None` leaves the stored value untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Validate)]
pub struct ProfileUpdate {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub household_type: Option<HouseholdType>,
    #[validate(length(min = 1, max = 200))]
    pub address: Option<String>,
    #[validate(range(max = 50))]
    pub resident_count: Option<u32>,
    pub income_level: Option<String>,
    pub avatar: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        *self == ProfileUpdate::default()
    }
}

impl UserProfile {
    /// Merge the fields present in `update` into this profile
    pub fn merge(&mut self, update: ProfileUpdate) {
        let ProfileUpdate {
            name,
            email,
            household_type,
            address,
            resident_count,
            income_level,
            avatar,
        } = update;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(email) = email {
            self.email = email;
        }
        if let Some(household_type) = household_type {
            self.household_type = household_type;
        }
        if let Some(address) = address {
            self.address = address;
        }
        if let Some(resident_count) = resident_count {
            self.resident_count = resident_count;
        }
        if let Some(income_level) = income_level {
            self.income_level = income_level;
        }
        if avatar.is_some() {
            self.avatar = avatar;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> UserProfile {
        UserProfile {
            id: "user_001".to_string(),
            name: "Kim Energy".to_string(),
            email: "kim.energy@example.com".to_string(),
            household_type: HouseholdType::Apartment,
            address: "Seoul".to_string(),
            resident_count: 4,
            income_level: "Q3".to_string(),
            avatar: None,
        }
    }

    #[test]
    fn test_merge_only_touches_present_fields() {
        let mut p = profile();
        p.merge(ProfileUpdate {
            name: Some("Lee Saver".to_string()),
            resident_count: Some(2),
            ..Default::default()
        });

        assert_eq!(p.name, "Lee Saver");
        assert_eq!(p.resident_count, 2);
        assert_eq!(p.email, "kim.energy@example.com");
        assert_eq!(p.household_type, HouseholdType::Apartment);
        assert_eq!(p.id, "user_001");
    }

    #[test]
    fn test_empty_merge_is_noop() {
        let mut p = profile();
        let update = ProfileUpdate::default();
        assert!(update.is_empty());
        p.merge(update);
        assert_eq!(p, profile());
    }

    #[test]
    fn test_update_validation() {
        let ok = ProfileUpdate {
            email: Some("new@example.com".to_string()),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());

        let bad_email = ProfileUpdate {
            email: Some("not-an-email".to_string()),
            ..Default::default()
        };
        assert!(bad_email.validate().is_err());

        let too_many = ProfileUpdate {
            resident_count: Some(500),
            ..Default::default()
        };
        assert!(too_many.validate().is_err());
    }

    #[test]
    fn test_partial_update_from_json() {
        let update: ProfileUpdate =
            serde_json::from_str(r#"{"household_type":"villa","address":"Busan"}"#).unwrap();
        assert_eq!(update.household_type, Some(HouseholdType::Villa));
        assert_eq!(update.address.as_deref(), Some("Busan"));
        assert!(update.name.is_none());
    }
}
