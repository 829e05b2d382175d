//! Textual command dispatch and the per-pin status query.
//!
//! Two command shapes arrive from the host, already newline-stripped:
//!
//! - `<pin> <action>` — free-form, addressed to an arbitrary pin;
//! - `<action>` — addressed to the pin a named command endpoint is bound
//!   to (see [`BindingTable`]).
//!
//! Actions are `high`, `low`, `in`. Anything else, a missing or
//! non-numeric pin, an out-of-range pin, or an unresolvable endpoint name
//! rejects the whole command with [`Error::InvalidCommand`] before any
//! register is touched. Tokens past the two consumed ones are ignored.

use alloc::format;
use alloc::string::String;

use log::{debug, warn};

use crate::bindings::BindingTable;
use crate::controller::PinController;
use crate::low::io::RegisterIo;
use crate::{Error, Level, NUM_PINS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    High,
    Low,
    In,
}

fn parse_action(token: &str) -> Result<Action, Error> {
    match token {
        "high" => Ok(Action::High),
        "low" => Ok(Action::Low),
        "in" => Ok(Action::In),
        other => {
            warn!("unknown action {other:?}");
            Err(Error::InvalidCommand)
        }
    }
}

fn parse_pin(token: &str) -> Result<u32, Error> {
    let pin: u32 = token.parse().map_err(|_| {
        warn!("bad pin token {token:?}");
        Error::InvalidCommand
    })?;
    if pin >= NUM_PINS {
        warn!("pin {pin} out of range in command");
        return Err(Error::InvalidCommand);
    }
    Ok(pin)
}

/// `high` and `low` re-assert the output function unconditionally, even
/// when the pin is already an output; the function write is idempotent.
fn apply<R: RegisterIo>(
    ctl: &mut PinController<R>,
    pin: u32,
    action: Action,
) -> Result<(), Error> {
    debug!("dispatch {action:?} to pin {pin}");
    match action {
        Action::High => ctl.configure_output(pin, Level::High),
        Action::Low => ctl.configure_output(pin, Level::Low),
        Action::In => ctl.configure_input(pin),
    }
}

/// Dispatch a free-form `<pin> <action>` command.
pub fn dispatch<R: RegisterIo>(ctl: &mut PinController<R>, line: &str) -> Result<(), Error> {
    let mut tokens = line.split_whitespace();
    let pin = parse_pin(tokens.next().ok_or(Error::InvalidCommand)?)?;
    let action = parse_action(tokens.next().ok_or(Error::InvalidCommand)?)?;
    apply(ctl, pin, action)
}

/// Dispatch a single-token `<action>` command addressed to the pin bound
/// to the endpoint `name`.
pub fn dispatch_bound<R: RegisterIo>(
    ctl: &mut PinController<R>,
    table: &BindingTable,
    name: &str,
    line: &str,
) -> Result<(), Error> {
    let pin = table.resolve(name).ok_or_else(|| {
        warn!("no binding named {name:?}");
        Error::InvalidCommand
    })?;
    let action = parse_action(line.split_whitespace().next().ok_or(Error::InvalidCommand)?)?;
    apply(ctl, pin, action)
}

/// Render `pin`'s current status as a single text line: `input: <0|1>`,
/// `output: <0|1>`, or the fixed refusal for alternate-function pins.
pub fn status_line<R: RegisterIo>(ctl: &PinController<R>, pin: u32) -> Result<String, Error> {
    let mode = ctl.read_function(pin)?;
    if !mode.is_io() {
        return Ok(String::from("Not input/output pin!"));
    }
    let level = ctl.read_level(pin)?;
    Ok(format!("{}: {}", mode.label(), level.bit()))
}
