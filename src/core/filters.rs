use crate::core::text::same_text;
use crate::models::{Profile, Role};

/// Check whether a profile may be proposed for a role at all
///
/// This is the hard gate that runs before scoring. The role must be open,
/// and where both sides state an age or a gender they must agree. Anything
/// unknown on either side passes.
#[inline]
pub fn is_eligible(profile: &Profile, role: &Role) -> bool {
    if !role.is_open() {
        return false;
    }

    let requirements = &role.requirements;

    if let Some(age) = profile.age {
        if requirements.min_age.is_some_and(|min| age < min) {
            return false;
        }
        if requirements.max_age.is_some_and(|max| age > max) {
            return false;
        }
    }

    if let (Some(wanted), Some(gender)) = (&requirements.gender, &profile.gender) {
        if !same_text(wanted, gender) {
            return false;
        }
    }

    true
}
