//! Normalized in-memory cache keys.

/// `city[+country]`, lowercased, with spaces turned into `+`.
pub fn city_key(city: &str, country: &str) -> String {
    join_key(&[city, country])
}

/// `location+city[+country]`, normalized like [`city_key`].
pub fn venue_key(location: &str, city: &str, country: &str) -> String {
    join_key(&[location, city, country])
}

fn join_key(parts: &[&str]) -> String {
    let mut key = String::new();
    for (i, part) in parts.iter().enumerate() {
        // only trailing parts are optional
        if i > 0 && part.is_empty() {
            continue;
        }
        if i > 0 {
            key.push('+');
        }
        key.push_str(&part.to_lowercase());
    }
    key.replace(' ', "+")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_key() {
        assert_eq!(city_key("Zürich", ""), "zürich");
        assert_eq!(city_key("New York", "USA"), "new+york+usa");
        assert_eq!(city_key("Bad Ragaz", "Switzerland"), "bad+ragaz+switzerland");
    }

    #[test]
    fn test_venue_key() {
        assert_eq!(
            venue_key("Rote Fabrik", "Zürich", ""),
            "rote+fabrik+zürich"
        );
        assert_eq!(
            venue_key("Rote Fabrik", "Zürich", "CH"),
            "rote+fabrik+zürich+ch"
        );
    }
}
