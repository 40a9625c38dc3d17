// List membership helpers.
// Tests whether one string, or any of several, appears in a list of strings.

/// What to look for: one string, or any of several.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Containee<'a> {
    One(&'a str),
    Any(Vec<&'a str>),
}

impl<'a> From<&'a str> for Containee<'a> {
    fn from(s: &'a str) -> Self {
        Containee::One(s)
    }
}

impl<'a> From<&'a String> for Containee<'a> {
    fn from(s: &'a String) -> Self {
        Containee::One(s)
    }
}

impl<'a, S: AsRef<str>> From<&'a [S]> for Containee<'a> {
    fn from(items: &'a [S]) -> Self {
        Containee::Any(items.iter().map(AsRef::as_ref).collect())
    }
}

impl<'a, S: AsRef<str>, const N: usize> From<&'a [S; N]> for Containee<'a> {
    fn from(items: &'a [S; N]) -> Self {
        Containee::from(&items[..])
    }
}

impl<'a, S: AsRef<str>> From<&'a Vec<S>> for Containee<'a> {
    fn from(items: &'a Vec<S>) -> Self {
        Containee::from(items.as_slice())
    }
}

impl<'a> Containee<'a> {
    fn items(&self) -> &[&'a str] {
        match self {
            Containee::One(s) => std::slice::from_ref(s),
            Containee::Any(items) => items,
        }
    }
}

fn contains<S: AsRef<str>>(container: &[S], item: &str) -> bool {
    container.iter().any(|c| c.as_ref() == item)
}

/// True if the string (or any of the strings) is in `container`.
pub fn in_list<'a, S: AsRef<str>>(containee: impl Into<Containee<'a>>, container: &[S]) -> bool {
    let containee: Containee<'a> = containee.into();
    containee
        .items()
        .iter()
        .any(|item| contains(container, item))
}

/// How many of the given strings are in `container`.
pub fn in_list_count<'a, S: AsRef<str>>(
    containee: impl Into<Containee<'a>>,
    container: &[S],
) -> usize {
    let containee: Containee<'a> = containee.into();
    containee
        .items()
        .iter()
        .filter(|item| contains(container, item))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_list_single() {
        assert!(in_list("x", &["x", "y"]));
        assert!(!in_list("z", &["x", "y"]));
    }

    #[test]
    fn test_in_list_any() {
        assert!(!in_list(&["x", "z"], &["y"]));
        assert!(in_list(&["x", "z"], &["z"]));

        let owned = vec!["a".to_string(), "b".to_string()];
        assert!(in_list(&owned, &owned));
    }

    #[test]
    fn test_in_list_empty() {
        let none: [&str; 0] = [];
        assert!(!in_list(&none, &["x"]));
        assert!(!in_list("x", &none));
    }

    #[test]
    fn test_in_list_count() {
        assert_eq!(in_list_count(&["a", "b", "c"], &["a", "c", "d"]), 2);
        assert_eq!(in_list_count("d", &["a", "c", "d"]), 1);
        assert_eq!(in_list_count("e", &["a"]), 0);
    }
}
