use colored::Colorize;
use std::borrow::Cow;
use std::rc::Rc;

// =============================================================================
// Milestone 1: Functions that carry their own identity
// =============================================================================

/// Identity a function exposes to callers, independent of its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub name: Cow<'static, str>,
    pub doc: Option<Cow<'static, str>>,
}

/// Uniform call interface over closures of different arities. Arguments are
/// passed as a tuple.
pub trait Callable<Args> {
    type Output;

    fn invoke(&self, args: Args) -> Self::Output;
}

impl<F, R> Callable<()> for F
where
    F: Fn() -> R,
{
    type Output = R;

    fn invoke(&self, _: ()) -> R {
        self()
    }
}

impl<F, A, R> Callable<(A,)> for F
where
    F: Fn(A) -> R,
{
    type Output = R;

    fn invoke(&self, (a,): (A,)) -> R {
        self(a)
    }
}

impl<F, A, B, R> Callable<(A, B)> for F
where
    F: Fn(A, B) -> R,
{
    type Output = R;

    fn invoke(&self, (a, b): (A, B)) -> R {
        self(a, b)
    }
}

pub struct Function<F> {
    meta: Metadata,
    body: F,
}

impl<F> Function<F> {
    pub fn new(name: impl Into<Cow<'static, str>>, body: F) -> Self {
        Self {
            meta: Metadata {
                name: name.into(),
                doc: None,
            },
            body,
        }
    }

    pub fn with_doc(mut self, doc: impl Into<Cow<'static, str>>) -> Self {
        self.meta.doc = Some(doc.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.meta.name
    }

    pub fn doc(&self) -> Option<&str> {
        self.meta.doc.as_deref()
    }

    pub fn metadata(&self) -> &Metadata {
        &self.meta
    }

    pub fn call<Args>(&self, args: Args) -> F::Output
    where
        F: Callable<Args>,
    {
        self.body.invoke(args)
    }
}

/// Builds a [`Function`] named after the item it wraps.
macro_rules! function {
    ($f:ident) => {
        Function::new(stringify!($f), $f)
    };
}

/// Gives `wrapper` the identity of the function it replaces. Without this a
/// wrapper keeps whatever name it was created with.
pub fn wraps<W>(wrapped: &Metadata, wrapper: Function<W>) -> Function<W> {
    Function {
        meta: wrapped.clone(),
        body: wrapper.body,
    }
}

// =============================================================================
// Milestone 2: Logging decorators
// =============================================================================

pub type Sink = Rc<dyn Fn(&str)>;

fn stdout_sink() -> Sink {
    Rc::new(|line: &str| match line.split_once(' ') {
        Some((label, rest)) => println!("{} {}", label.yellow().bold(), rest),
        None => println!("{}", line.yellow()),
    })
}

/// Body of a logging wrapper: emits one line, then forwards the call.
pub struct Logged<F> {
    line: String,
    sink: Sink,
    inner: Function<F>,
}

impl<F> Logged<F> {
    pub fn log_line(&self) -> &str {
        &self.line
    }
}

impl<F, Args> Callable<Args> for Logged<F>
where
    F: Callable<Args>,
{
    type Output = F::Output;

    fn invoke(&self, args: Args) -> F::Output {
        (self.sink)(self.log_line());
        self.inner.call(args)
    }
}

/// Decorator with an optional label, e.g. `logger("DEBUG")`.
#[derive(Clone)]
pub struct Logger {
    text: Option<String>,
    sink: Sink,
}

impl Logger {
    pub fn with_sink(mut self, sink: impl Fn(&str) + 'static) -> Self {
        self.sink = Rc::new(sink);
        self
    }

    pub fn decorate<F>(&self, func: Function<F>) -> Function<Logged<F>> {
        let line = match &self.text {
            Some(text) => format!("{} {}():", text, func.name()),
            None => format!("call {}():", func.name()),
        };
        let meta = func.metadata().clone();
        let wrapper = Function::new(
            "wrapper",
            Logged {
                line,
                sink: Rc::clone(&self.sink),
                inner: func,
            },
        );
        wraps(&meta, wrapper)
    }
}

/// `@log`
pub fn log<F>(func: Function<F>) -> Function<Logged<F>> {
    Logger {
        text: None,
        sink: stdout_sink(),
    }
    .decorate(func)
}

/// `@logger(text)`
pub fn logger(text: impl Into<String>) -> Logger {
    Logger {
        text: Some(text.into()),
        sink: stdout_sink(),
    }
}

// =============================================================================
// Milestone 3: The lesson itself
// =============================================================================

fn now() {
    println!("2024-6-1 12:34");
}

fn today() {
    println!("2024-6-1");
}

fn main() {
    let now = log(function!(now));
    now.call(());

    let today = logger("DEBUG").decorate(function!(today).with_doc("Prints today's date."));
    today.call(());
    println!("{}", today.name());
}
