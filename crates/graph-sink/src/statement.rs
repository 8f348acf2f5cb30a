//! Parameterized write statements.

use std::fmt;

/// A parameter value bound to a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<i64> for Param {
    fn from(value: i64) -> Self {
        Param::Int(value)
    }
}

impl From<f64> for Param {
    fn from(value: f64) -> Self {
        Param::Float(value)
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Param::Text(value)
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Param::Text(value.to_string())
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::Int(i) => write!(f, "{i}"),
            Param::Float(x) => write!(f, "{x}"),
            Param::Text(s) => write!(f, "{s:?}"),
        }
    }
}

/// A statement template together with its parameter mapping.
///
/// Templates are `'static` because every statement an importer issues comes
/// from a fixed set of constants; only the parameters vary per row.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    template: &'static str,
    params: Vec<(&'static str, Param)>,
}

impl Statement {
    pub fn new(template: &'static str) -> Self {
        Self {
            template,
            params: Vec::new(),
        }
    }

    /// Bind a named parameter. Binding the same name twice replaces the value.
    pub fn param(mut self, name: &'static str, value: impl Into<Param>) -> Self {
        let value = value.into();
        match self.params.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.params.push((name, value)),
        }
        self
    }

    pub fn template(&self) -> &'static str {
        self.template
    }

    pub fn params(&self) -> &[(&'static str, Param)] {
        &self.params
    }

    /// Look up a bound parameter by name.
    pub fn get(&self, name: &str) -> Option<&Param> {
        self.params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.template)?;
        if !self.params.is_empty() {
            let params: Vec<String> = self
                .params
                .iter()
                .map(|(key, value)| format!("{key}: {value}"))
                .collect();
            write!(f, " {{{}}}", params.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_binding() {
        let stmt = Statement::new("CREATE (:Movie {movieId: $movieId, title: $title})")
            .param("movieId", 1i64)
            .param("title", "Toy Story (1995)");

        assert_eq!(stmt.get("movieId"), Some(&Param::Int(1)));
        assert_eq!(
            stmt.get("title"),
            Some(&Param::Text("Toy Story (1995)".to_string()))
        );
        assert_eq!(stmt.get("missing"), None);
        assert_eq!(stmt.params().len(), 2);
    }

    #[test]
    fn test_rebinding_replaces_value() {
        let stmt = Statement::new("RETURN $x").param("x", 1i64).param("x", 2.5);
        assert_eq!(stmt.params(), &[("x", Param::Float(2.5))]);
    }

    #[test]
    fn test_display() {
        let stmt = Statement::new("MERGE (u:User {userId: $userId})").param("userId", 7i64);
        assert_eq!(stmt.to_string(), "MERGE (u:User {userId: $userId}) {userId: 7}");

        let bare = Statement::new("RETURN 1");
        assert_eq!(bare.to_string(), "RETURN 1");
    }
}
