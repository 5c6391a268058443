use std::io::{BufRead, Write};

use rand::Rng;
use rand::seq::IndexedRandom;
use storage::repository::CorpusRepository;

use crate::prompt::Prompter;

/// Pick one file from the corpus directory at random, name it, and print its
/// text if asked to. Only `.txt` files are offered for printing.
///
/// # Errors
///
/// Returns listing failures and console I/O errors. An unreadable file is
/// reported on the console instead.
pub fn run<R: BufRead, W: Write, G: Rng + ?Sized>(
    prompter: &mut Prompter<R, W>,
    corpus: &dyn CorpusRepository,
    rng: &mut G,
) -> Result<(), Box<dyn std::error::Error>> {
    let files = corpus.list_files()?;
    let Some(name) = files.choose(rng) else {
        prompter.say("No source files found.")?;
        return Ok(());
    };
    prompter.say(format_args!("Picked: {name}"))?;

    if !name.to_lowercase().ends_with(".txt") {
        prompter.say("The picked file is not a text file.")?;
        return Ok(());
    }

    if !prompter.confirm("Show its contents? (y/n): ")? {
        prompter.say("Not opened.")?;
        return Ok(());
    }

    match corpus.read_file(name) {
        Ok(text) => {
            prompter.blank()?;
            prompter.say("--- Contents ---")?;
            prompter.say(text.trim_end())?;
            prompter.say("--- end ---")?;
        }
        Err(err) => {
            tracing::warn!(file = %name, %err, "picked file unreadable");
            prompter.say(format_args!("Could not open {name}: {err}"))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::SourceId;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::io::Cursor;
    use storage::InMemoryRepository;
    use storage::repository::StorageError;

    /// A directory listing with one image and nothing else.
    struct ImagesOnly;

    impl CorpusRepository for ImagesOnly {
        fn list_sources(&self) -> Result<Vec<SourceId>, StorageError> {
            Ok(Vec::new())
        }

        fn read_source(&self, source: &SourceId) -> Result<String, StorageError> {
            Err(StorageError::NotFound(source.to_string()))
        }

        fn list_files(&self) -> Result<Vec<String>, StorageError> {
            Ok(vec!["cover.png".to_owned()])
        }
    }

    fn pick(repo: &dyn CorpusRepository, input: &str) -> String {
        let mut prompter = Prompter::new(Cursor::new(input.to_owned()), Vec::new());
        let mut rng = StdRng::seed_from_u64(9);
        run(&mut prompter, repo, &mut rng).unwrap();
        String::from_utf8(prompter.into_output()).unwrap()
    }

    #[test]
    fn prints_contents_after_confirmation() {
        let repo = InMemoryRepository::new();
        repo.insert_source(SourceId::new("Lemon").unwrap(), "first line\nsecond line\n")
            .unwrap();

        let out = pick(&repo, "y\n");
        assert!(out.contains("Picked: Lemon.txt"));
        assert!(out.contains("first line\nsecond line\n--- end ---"));

        let declined = pick(&repo, "n\n");
        assert!(declined.contains("Not opened."));
        assert!(!declined.contains("first line"));
    }

    #[test]
    fn non_text_pick_is_not_opened() {
        let out = pick(&ImagesOnly, "y\n");
        assert!(out.contains("Picked: cover.png"));
        assert!(out.contains("The picked file is not a text file."));
        assert!(!out.contains("Show its contents?"));
    }

    #[test]
    fn empty_corpus_is_reported() {
        let out = pick(&InMemoryRepository::new(), "");
        assert_eq!(out.trim(), "No source files found.");
    }
}
