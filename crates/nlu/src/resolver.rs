//! Contact resolution
//!
//! Matches an extracted name against the principal's contact snapshot using
//! a tiered, first-match-wins strategy. Each tier runs only when the
//! previous tier found nothing:
//!
//! 1. Case-insensitive exact full-name equality
//! 2. Substring containment in either direction
//! 3. First-token (first name) equality or containment
//! 4. Any candidate-name token that is a prefix of the input, or vice versa
//!
//! Intentionally permissive, favoring usability over precision: "Ram" can
//! resolve to "Ramesh" even when "Ramu" is also present, and first match
//! wins. Callers that want to surface the ambiguity instead of silently
//! picking can use [`ContactResolver::resolve_all`].

use payvoice_core::Contact;

/// Tiered fuzzy contact matcher. Stateless; idempotent for a given input
/// and snapshot.
#[derive(Debug, Default)]
pub struct ContactResolver;

impl ContactResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolve a spoken name against the snapshot. `None` when every tier
    /// exhausts without a match.
    pub fn resolve<'a>(&self, name: &str, contacts: &'a [Contact]) -> Option<&'a Contact> {
        let input = name.trim().to_lowercase();
        if input.is_empty() {
            return None;
        }

        // Tier 1: exact full-name equality
        if let Some(contact) = contacts.iter().find(|c| c.name.to_lowercase() == input) {
            return Some(contact);
        }

        // Tier 2: substring containment either direction
        if let Some(contact) = contacts.iter().find(|c| {
            let candidate = c.name.to_lowercase();
            candidate.contains(&input) || input.contains(&candidate)
        }) {
            return Some(contact);
        }

        // Tier 3: first-name equality or containment
        if let Some(contact) = contacts.iter().find(|c| {
            match c.name.to_lowercase().split_whitespace().next() {
                Some(first) => first == input || first.contains(&input) || input.contains(first),
                None => false,
            }
        }) {
            return Some(contact);
        }

        // Tier 4: token prefix in either direction
        contacts.iter().find(|c| {
            c.name
                .to_lowercase()
                .split_whitespace()
                .any(|token| token.starts_with(&input) || input.starts_with(token))
        })
    }

    /// Every contact an exact or substring tier would accept, for callers
    /// that prefer to ask the user instead of taking the first candidate.
    pub fn resolve_all<'a>(&self, name: &str, contacts: &'a [Contact]) -> Vec<&'a Contact> {
        let input = name.trim().to_lowercase();
        if input.is_empty() {
            return Vec::new();
        }
        contacts
            .iter()
            .filter(|c| {
                let candidate = c.name.to_lowercase();
                candidate == input || candidate.contains(&input) || input.contains(&candidate)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> Vec<Contact> {
        vec![
            Contact::new("Ramesh Kumar", "9876543210"),
            Contact::new("Ramu", "9876543211"),
            Contact::new("Sita Devi", "9876543212"),
            Contact::new("Mohan", "9876543213"),
        ]
    }

    #[test]
    fn test_exact_match() {
        let contacts = snapshot();
        let resolver = ContactResolver::new();
        assert_eq!(resolver.resolve("mohan", &contacts).unwrap().name, "Mohan");
        assert_eq!(resolver.resolve("RAMESH KUMAR", &contacts).unwrap().name, "Ramesh Kumar");
    }

    #[test]
    fn test_substring_match() {
        let contacts = snapshot();
        let resolver = ContactResolver::new();
        assert_eq!(resolver.resolve("sita", &contacts).unwrap().name, "Sita Devi");
    }

    #[test]
    fn test_first_match_wins_on_ambiguity() {
        // Documented permissiveness: "Ram" hits Ramesh Kumar before Ramu.
        let contacts = snapshot();
        let resolver = ContactResolver::new();
        assert_eq!(resolver.resolve("ram", &contacts).unwrap().name, "Ramesh Kumar");
    }

    #[test]
    fn test_resolve_all_surfaces_ambiguity() {
        let contacts = snapshot();
        let resolver = ContactResolver::new();
        let matches = resolver.resolve_all("ram", &contacts);
        let names: Vec<_> = matches.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Ramesh Kumar", "Ramu"]);
    }

    #[test]
    fn test_token_prefix_tier() {
        let contacts = snapshot();
        let resolver = ContactResolver::new();
        // Token "kumar" of "Ramesh Kumar" is a prefix of the input.
        assert_eq!(resolver.resolve("kumarji", &contacts).unwrap().name, "Ramesh Kumar");
    }

    #[test]
    fn test_idempotent() {
        let contacts = snapshot();
        let resolver = ContactResolver::new();
        let a = resolver.resolve("ram", &contacts).map(|c| c.id);
        let b = resolver.resolve("ram", &contacts).map(|c| c.id);
        assert_eq!(a, b);
    }

    #[test]
    fn test_no_match() {
        let contacts = snapshot();
        let resolver = ContactResolver::new();
        assert!(resolver.resolve("zubin", &contacts).is_none());
        assert!(resolver.resolve("", &contacts).is_none());
    }
}
