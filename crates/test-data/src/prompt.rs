//! Interactive confirmation before destructive operations.

use std::io::{BufRead, Write};

use rand::Rng;

use crate::builders::{ScenarioBuilder, ScenarioResult};
use crate::db::{FixtureStore, SeedError};

/// Question shown before clearing existing collections.
pub const CLEAR_PROMPT: &str = "Clear existing data? (y/N): ";

/// Interprets an answer: only `y` (trimmed, case-insensitive) means yes.
pub fn is_yes(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

/// Asks whether existing data should be cleared and reads one line of input.
///
/// End of input counts as "no".
pub fn confirm_clear(input: &mut impl BufRead, output: &mut impl Write) -> Result<bool, SeedError> {
    output.write_all(CLEAR_PROMPT.as_bytes())?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

/// Asks about clearing, then builds and seeds `builder` into `store`.
///
/// Every failure, including a failed prompt read, is returned to the caller
/// so the connection can be closed before exiting.
pub async fn confirm_and_seed<S: FixtureStore>(
    builder: ScenarioBuilder,
    store: &S,
    input: &mut impl BufRead,
    output: &mut impl Write,
    rng: &mut impl Rng,
) -> Result<ScenarioResult, SeedError> {
    let clear = confirm_clear(input, output)?;
    builder.with_clear_existing(clear).build(store, rng).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Collection, MemoryStore};
    use std::io::{self, Cursor, Read};

    struct BrokenInput;

    impl Read for BrokenInput {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdin closed"))
        }
    }

    impl BufRead for BrokenInput {
        fn fill_buf(&mut self) -> io::Result<&[u8]> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdin closed"))
        }

        fn consume(&mut self, _amt: usize) {}
    }

    #[test]
    fn test_only_y_means_yes() {
        assert!(is_yes("y"));
        assert!(is_yes(" Y \n"));
        assert!(!is_yes("yes"));
        assert!(!is_yes("n"));
        assert!(!is_yes(""));
    }

    #[test]
    fn test_confirm_clear_reads_one_line() {
        let mut output = Vec::new();
        let confirmed = confirm_clear(&mut Cursor::new("y\nignored\n"), &mut output).unwrap();

        assert!(confirmed);
        assert_eq!(String::from_utf8(output).unwrap(), CLEAR_PROMPT);
    }

    #[test]
    fn test_end_of_input_is_no() {
        let mut output = Vec::new();
        assert!(!confirm_clear(&mut Cursor::new(""), &mut output).unwrap());
    }

    #[tokio::test]
    async fn test_prompt_failure_is_returned_before_seeding() {
        let store = MemoryStore::new();
        let mut rng = rand::thread_rng();
        let mut output = Vec::new();

        let outcome = confirm_and_seed(
            ScenarioBuilder::small_test(),
            &store,
            &mut BrokenInput,
            &mut output,
            &mut rng,
        )
        .await;

        assert!(matches!(outcome, Err(SeedError::Io(_))));
        assert_eq!(store.count(Collection::User).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_yes_clears_before_seeding() {
        let store = MemoryStore::new();
        let mut rng = rand::thread_rng();

        for _ in 0..2 {
            let mut output = Vec::new();
            let result = confirm_and_seed(
                ScenarioBuilder::small_test(),
                &store,
                &mut Cursor::new("y\n"),
                &mut output,
                &mut rng,
            )
            .await
            .unwrap();

            assert_eq!(
                store.count(Collection::User).await.unwrap() as usize,
                result.users.len()
            );
        }
    }
}
