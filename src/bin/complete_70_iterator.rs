use std::fmt;
use thiserror::Error;

// =============================================================================
// Milestone 1: Capability traits
// =============================================================================

/// Something that can hand out an iterator over its elements.
///
/// Containers hand out a fresh iterator every time. Iterators hand out
/// themselves, so whatever they have already yielded stays consumed.
pub trait Iterable {
    fn iter_values(&mut self) -> Box<dyn Iterator<Item = Value> + '_>;
}

impl Iterable for Vec<Value> {
    fn iter_values(&mut self) -> Box<dyn Iterator<Item = Value> + '_> {
        Box::new(self.iter().cloned())
    }
}

impl Iterable for String {
    fn iter_values(&mut self) -> Box<dyn Iterator<Item = Value> + '_> {
        Box::new(self.chars().map(|c| Value::Text(c.to_string())))
    }
}

/// Iterator over a snapshot of a list or string.
#[derive(Debug, Clone)]
pub struct SeqIter {
    type_name: &'static str,
    inner: std::vec::IntoIter<Value>,
}

impl SeqIter {
    fn new(type_name: &'static str, items: Vec<Value>) -> Self {
        Self {
            type_name,
            inner: items.into_iter(),
        }
    }
}

impl Iterator for SeqIter {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        self.inner.next()
    }
}

impl Iterable for SeqIter {
    fn iter_values(&mut self) -> Box<dyn Iterator<Item = Value> + '_> {
        Box::new(self)
    }
}

/// A lazily evaluated producer. Elements are computed on demand and each one
/// is handed out exactly once.
pub struct Generator {
    name: &'static str,
    produce: Box<dyn Iterator<Item = Value>>,
}

impl Generator {
    pub fn new(name: &'static str, produce: impl Iterator<Item = Value> + 'static) -> Self {
        Self {
            name,
            produce: Box::new(produce),
        }
    }
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator").field("name", &self.name).finish()
    }
}

impl Iterator for Generator {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        self.produce.next()
    }
}

impl Iterable for Generator {
    fn iter_values(&mut self) -> Box<dyn Iterator<Item = Value> + '_> {
        Box::new(self)
    }
}

/// Yields 1, 2 and 3.
pub fn g() -> Generator {
    let mut step = 0;
    Generator::new(
        "g",
        std::iter::from_fn(move || {
            step += 1;
            (step <= 3).then_some(Value::Int(step))
        }),
    )
}

// =============================================================================
// Milestone 2: Dynamic values and capability queries
// =============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IterError {
    #[error("'{0}' object is not iterable")]
    NotIterable(&'static str),
}

#[derive(Debug)]
pub enum Value {
    Int(i64),
    Text(String),
    List(Vec<Value>),
    SeqIter(SeqIter),
    Generator(Generator),
}

impl Value {
    pub fn list(items: impl IntoIterator<Item = i64>) -> Self {
        Value::List(items.into_iter().map(Value::Int).collect())
    }

    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Text(_) => "str",
            Value::List(_) => "list",
            Value::SeqIter(it) => it.type_name,
            Value::Generator(_) => "generator",
        }
    }

    pub fn as_iterable(&mut self) -> Option<&mut dyn Iterable> {
        match self {
            Value::Text(s) => Some(s),
            Value::List(items) => Some(items),
            Value::SeqIter(it) => Some(it),
            Value::Generator(generator) => Some(generator),
            Value::Int(_) => None,
        }
    }

    pub fn as_iterator(&mut self) -> Option<&mut dyn Iterator<Item = Value>> {
        match self {
            Value::SeqIter(it) => Some(it),
            Value::Generator(generator) => Some(generator),
            Value::Int(_) | Value::Text(_) | Value::List(_) => None,
        }
    }
}

impl Clone for Value {
    // A generator cannot be rewound, so its clone starts out exhausted.
    fn clone(&self) -> Self {
        match self {
            Value::Int(n) => Value::Int(*n),
            Value::Text(s) => Value::Text(s.clone()),
            Value::List(items) => Value::List(items.clone()),
            Value::SeqIter(it) => Value::SeqIter(it.clone()),
            Value::Generator(generator) => {
                Value::Generator(Generator::new(generator.name, std::iter::empty()))
            }
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Text(s) => write!(f, "'{s}'"),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::SeqIter(it) => write!(f, "<{} object>", it.type_name),
            Value::Generator(generator) => write!(f, "<generator object {}>", generator.name),
        }
    }
}

pub fn is_iterable(value: &mut Value) -> bool {
    value.as_iterable().is_some()
}

pub fn is_iterator(value: &mut Value) -> bool {
    value.as_iterator().is_some()
}

/// Turns an iterable value into an iterator value. Iterators come back as
/// themselves.
pub fn iter(value: Value) -> Result<Value, IterError> {
    match value {
        Value::List(items) => Ok(Value::SeqIter(SeqIter::new("list_iterator", items))),
        Value::Text(mut s) => {
            let chars: Vec<Value> = s.iter_values().collect();
            Ok(Value::SeqIter(SeqIter::new("str_ascii_iterator", chars)))
        }
        it @ (Value::SeqIter(_) | Value::Generator(_)) => Ok(it),
        other => Err(IterError::NotIterable(other.type_name())),
    }
}

fn title_case(b: bool) -> &'static str {
    if b {
        "True"
    } else {
        "False"
    }
}

fn main() -> Result<(), IterError> {
    let mut iterable_checks = vec![
        ("[1, 2, 3]", Value::list([1, 2, 3])),
        ("'abc'", Value::text("abc")),
        ("123", Value::Int(123)),
        ("g()", Value::Generator(g())),
    ];
    for (label, value) in iterable_checks.iter_mut() {
        println!("Iterable? {}: {}", label, title_case(is_iterable(value)));
    }

    println!();

    let mut iterator_checks = vec![
        ("[1, 2, 3]", Value::list([1, 2, 3])),
        ("iter([1, 2, 3])", iter(Value::list([1, 2, 3]))?),
        ("'abc'", Value::text("abc")),
        ("123", Value::Int(123)),
        ("g()", Value::Generator(g())),
    ];
    for (label, value) in iterator_checks.iter_mut() {
        println!("Iterator? {}: {}", label, title_case(is_iterator(value)));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_iterable<T: Iterable>() {}
    fn assert_iterator<T: Iterator>() {}

    #[test]
    fn test_capabilities_are_traits() {
        assert_iterable::<Vec<Value>>();
        assert_iterable::<String>();
        assert_iterable::<SeqIter>();
        assert_iterator::<SeqIter>();
        assert_iterable::<Generator>();
        assert_iterator::<Generator>();
    }

    #[test]
    fn test_list_is_iterable_not_iterator() {
        let mut list = Value::list([1, 2, 3]);
        assert!(is_iterable(&mut list));
        assert!(!is_iterator(&mut list));
    }

    #[test]
    fn test_text_is_iterable_not_iterator() {
        let mut text = Value::text("abc");
        assert!(is_iterable(&mut text));
        assert!(!is_iterator(&mut text));
    }

    #[test]
    fn test_int_is_neither() {
        let mut n = Value::Int(123);
        assert!(!is_iterable(&mut n));
        assert!(!is_iterator(&mut n));
    }

    #[test]
    fn test_generator_is_both() {
        let mut generator = Value::Generator(g());
        assert!(is_iterable(&mut generator));
        assert!(is_iterator(&mut generator));
    }

    #[test]
    fn test_iter_of_list_is_both() {
        let mut it = iter(Value::list([1, 2, 3])).unwrap();
        assert_eq!(it.type_name(), "list_iterator");
        assert!(is_iterable(&mut it));
        assert!(is_iterator(&mut it));
    }

    #[test]
    fn test_iter_of_text_is_a_string_iterator() {
        let mut it = iter(Value::text("abc")).unwrap();
        assert_eq!(it.type_name(), "str_ascii_iterator");
        assert_eq!(it.to_string(), "<str_ascii_iterator object>");
        assert!(is_iterator(&mut it));
    }

    #[test]
    fn test_iter_of_int_fails() {
        let err = iter(Value::Int(123)).unwrap_err();
        assert_eq!(err, IterError::NotIterable("int"));
        assert_eq!(err.to_string(), "'int' object is not iterable");
    }

    #[test]
    fn test_list_iterates_repeatedly() {
        let mut list = Value::list([1, 2, 3]);
        let it = list.as_iterable().unwrap();
        assert_eq!(it.iter_values().count(), 3);
        assert_eq!(it.iter_values().count(), 3);
    }

    #[test]
    fn test_generator_is_exhausted_once() {
        let mut generator = g();
        let first: Vec<Value> = generator.iter_values().collect();
        assert_eq!(first, vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
        assert_eq!(generator.iter_values().count(), 0);
        assert_eq!(generator.next(), None);
    }

    #[test]
    fn test_iterator_resumes_where_it_stopped() {
        let mut it = iter(Value::list([1, 2, 3])).unwrap();
        let stepper = it.as_iterator().unwrap();
        assert_eq!(stepper.next(), Some(Value::Int(1)));

        let rest: Vec<Value> = it.as_iterable().unwrap().iter_values().collect();
        assert_eq!(rest, vec![Value::Int(2), Value::Int(3)]);
    }

    #[test]
    fn test_text_yields_characters() {
        let it = iter(Value::text("ab")).unwrap();
        let Value::SeqIter(chars) = it else {
            panic!("expected sequence iterator");
        };
        assert_eq!(chars.collect::<Vec<_>>(), vec![Value::text("a"), Value::text("b")]);
    }

    #[test]
    fn test_display_matches_repr() {
        assert_eq!(Value::list([1, 2, 3]).to_string(), "[1, 2, 3]");
        assert_eq!(Value::text("abc").to_string(), "'abc'");
        assert_eq!(Value::Int(123).to_string(), "123");
        assert_eq!(Value::Generator(g()).to_string(), "<generator object g>");
    }
}
