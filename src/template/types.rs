//! Template binding types

/// Ordered list of `(token, value)` pairs applied by [`render`](super::render).
///
/// Tokens are matched literally, including their `${` and `}` delimiters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    pairs: Vec<(String, String)>,
}

impl Bindings {
    /// Create an empty binding list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a binding and return the list (builder style)
    pub fn bind(mut self, token: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(token, value);
        self
    }

    /// Append a binding in place
    pub fn push(&mut self, token: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((token.into(), value.into()));
    }

    /// Iterate over the bindings in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.pairs.iter().map(|(t, v)| (t.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<T, V> FromIterator<(T, V)> for Bindings
where
    T: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (T, V)>>(iter: I) -> Self {
        let mut bindings = Bindings::new();
        for (token, value) in iter {
            bindings.push(token, value);
        }
        bindings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bindings_keep_insertion_order() {
        let bindings: Bindings = [("${b}", "2"), ("${a}", "1")].into_iter().collect();

        let tokens: Vec<_> = bindings.iter().map(|(t, _)| t).collect();
        assert_eq!(tokens, vec!["${b}", "${a}"]);
        assert_eq!(bindings.len(), 2);
        assert!(!bindings.is_empty());
    }
}
