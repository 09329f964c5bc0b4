use std::io::{self, BufRead, Write};

use shopfront_app::prompt::{Confirm, Decision, Prompt};

/// Asks on stderr and reads the answer from stdin.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &Prompt) -> Decision {
        let mut stderr = io::stderr().lock();

        if write!(stderr, "{}: {} [y/N] ", prompt.title, prompt.message)
            .and_then(|()| stderr.flush())
            .is_err()
        {
            return Decision::Cancel;
        }

        let mut answer = String::new();

        if io::stdin().lock().read_line(&mut answer).is_err() {
            return Decision::Cancel;
        }

        parse_answer(&answer)
    }
}

fn parse_answer(answer: &str) -> Decision {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" | "c" | "có" => Decision::Confirm,
        _ => Decision::Cancel,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_explicit_yes_confirms() {
        assert_eq!(parse_answer("y\n"), Decision::Confirm);
        assert_eq!(parse_answer(" Có "), Decision::Confirm);
        assert_eq!(parse_answer("\n"), Decision::Cancel);
        assert_eq!(parse_answer("nope"), Decision::Cancel);
    }
}
