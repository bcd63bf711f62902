// Eligibility filtering over scheme records
use crate::{Demographics, Scheme};

pub trait Filter {
    fn matches(&self, scheme: &Scheme) -> bool;
}

/// Accepts schemes whose demographic fields equal every field that is set
pub struct EligibilityFilter {
    demographics: Demographics,
}

impl EligibilityFilter {
    pub fn new(demographics: Demographics) -> Self {
        Self { demographics }
    }
}

impl Filter for EligibilityFilter {
    fn matches(&self, scheme: &Scheme) -> bool {
        let d = &self.demographics;
        d.age.map_or(true, |age| scheme.age == age)
            && d.social_category.map_or(true, |c| scheme.social_category == c)
            && d.gender.map_or(true, |g| scheme.gender == g)
            && d.domicile.map_or(true, |dom| scheme.domicile == dom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AgeBracket, Domicile, Gender, SocialCategory};

    fn scheme(gender: Gender, domicile: Domicile) -> Scheme {
        Scheme {
            name: "Test".to_string(),
            description: "test".to_string(),
            age: AgeBracket::From26To30,
            social_category: SocialCategory::Obc,
            gender,
            domicile,
            user_id: None,
        }
    }

    #[test]
    fn test_unset_fields_match_anything() {
        let filter = EligibilityFilter::new(Demographics::default());
        assert!(filter.matches(&scheme(Gender::Male, Domicile::No)));
    }

    #[test]
    fn test_all_set_fields_must_match() {
        let filter = EligibilityFilter::new(Demographics {
            gender: Some(Gender::Female),
            domicile: Some(Domicile::Yes),
            ..Default::default()
        });
        assert!(filter.matches(&scheme(Gender::Female, Domicile::Yes)));
        assert!(!filter.matches(&scheme(Gender::Female, Domicile::No)));
        assert!(!filter.matches(&scheme(Gender::Male, Domicile::Yes)));
    }
}
