//! Submission gate: validate locally, then allow exactly one request in
//! flight per form.
//!
//! `begin` hands out a [`Ticket`] when the form is valid and nothing is in
//! flight.  The response for that ticket must come back through `settle`;
//! a response carrying an older ticket (the form was reset meanwhile) is
//! reported as stale so the caller can drop it.

use thiserror::Error;

use super::validation::{FieldError, Form};

/// Proof that a submission was admitted by the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    #[error("a submission is already in flight")]
    InFlight,
    #[error("{} field(s) failed validation", .0.len())]
    Invalid(Vec<FieldError>),
}

#[derive(Debug, Default)]
pub struct SubmissionGate {
    generation: u64,
    in_flight: bool,
}

impl SubmissionGate {
    /// Validate `form` and, if it passes, mark a request as in flight.
    pub fn begin(&mut self, form: &mut Form) -> Result<Ticket, GateError> {
        if self.in_flight {
            return Err(GateError::InFlight);
        }
        form.validate().map_err(GateError::Invalid)?;
        self.generation += 1;
        self.in_flight = true;
        Ok(Ticket(self.generation))
    }

    /// Release the gate for `ticket`.  Returns `false` for a stale ticket,
    /// in which case the gate is left untouched.
    pub fn settle(&mut self, ticket: Ticket) -> bool {
        if !self.in_flight || ticket.0 != self.generation {
            return false;
        }
        self.in_flight = false;
        true
    }

    /// Forget any in-flight request; its response will be stale.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.in_flight = false;
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_login() -> Form {
        let mut form = Form::login();
        form.set_value("aarunyaId", "AR-26-0001");
        form.set_value("password", "hunter22");
        form
    }

    #[test]
    fn invalid_form_never_enters_flight() {
        let mut gate = SubmissionGate::default();
        let mut form = Form::login();
        form.set_value("aarunyaId", "BadFormat");
        form.set_value("password", "x");

        match gate.begin(&mut form) {
            Err(GateError::Invalid(errors)) => {
                assert_eq!(errors[0].message, "Invalid format. Use: AR-26-XXXX");
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
        assert!(!gate.is_in_flight());
    }

    #[test]
    fn second_submit_is_rejected_while_in_flight() {
        let mut gate = SubmissionGate::default();
        let mut form = valid_login();

        let ticket = gate.begin(&mut form).unwrap();
        assert_eq!(gate.begin(&mut form), Err(GateError::InFlight));

        assert!(gate.settle(ticket));
        assert!(gate.begin(&mut form).is_ok());
    }

    #[test]
    fn stale_ticket_does_not_release_a_newer_request() {
        let mut gate = SubmissionGate::default();
        let mut form = valid_login();

        let old = gate.begin(&mut form).unwrap();
        gate.reset();
        let new = gate.begin(&mut form).unwrap();

        assert!(!gate.settle(old));
        assert!(gate.is_in_flight());
        assert!(gate.settle(new));
        assert!(!gate.settle(new));
    }
}
