//! Built-in callables pre-installed in the global environment.
//!
//! Grounded on the original `native.go`: each built-in is its own
//! zero-sized [`Callable`] rather than an entry in a name-keyed dispatch
//! table, matching `FnClock`/`FnSleep`/`FnMin`/`FnMax`.

use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::RuntimeError;
use crate::interpreter::Interpreter;
use crate::value::{Callable, Value};

struct Clock;

impl Callable for Clock {
    fn name(&self) -> &str {
        "clock"
    }

    fn arity(&self) -> usize {
        0
    }

    fn call(&self, _interpreter: &mut Interpreter, _args: Vec<Value>) -> Result<Value, RuntimeError> {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| RuntimeError::without_line("system clock is before the Unix epoch"))?
            .as_nanos();
        Ok(Value::Number(nanos as f64))
    }
}

struct Sleep;

impl Callable for Sleep {
    fn name(&self) -> &str {
        "sleep"
    }

    fn arity(&self) -> usize {
        1
    }

    fn call(&self, _interpreter: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeError> {
        let Value::Number(ms) = args[0] else {
            return Err(RuntimeError::without_line("sleep() argument must be a number"));
        };
        std::thread::sleep(std::time::Duration::from_secs_f64(ms.max(0.0) / 1000.0));
        Ok(Value::Null)
    }
}

struct Min;

impl Callable for Min {
    fn name(&self) -> &str {
        "min"
    }

    fn arity(&self) -> usize {
        2
    }

    fn call(&self, _interpreter: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeError> {
        let (a, b) = as_numbers("min", &args)?;
        Ok(Value::Number(a.min(b)))
    }
}

struct Max;

impl Callable for Max {
    fn name(&self) -> &str {
        "max"
    }

    fn arity(&self) -> usize {
        2
    }

    fn call(&self, _interpreter: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeError> {
        let (a, b) = as_numbers("max", &args)?;
        Ok(Value::Number(a.max(b)))
    }
}

fn as_numbers(who: &str, args: &[Value]) -> Result<(f64, f64), RuntimeError> {
    let (Value::Number(a), Value::Number(b)) = (&args[0], &args[1]) else {
        return Err(RuntimeError::without_line(format!("{who}() arguments must be numbers")));
    };
    Ok((*a, *b))
}

/// Installs `clock`, `sleep`, `min`, `max` into `env`.
pub(crate) fn install(env: &crate::environment::EnvRef) {
    let builtins: [Rc<dyn Callable>; 4] = [Rc::new(Clock), Rc::new(Sleep), Rc::new(Min), Rc::new(Max)];
    for builtin in builtins {
        let name = glint_util::Symbol::intern(builtin.name());
        env.define(name, Value::Callable(builtin));
    }
}
