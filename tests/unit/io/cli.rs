//! Tests for command-line parsing and command processing

#[cfg(test)]
mod tests {
    use clap::Parser;
    use ndarray::{Array2, array};
    use quadfa::QuadfaError;
    use quadfa::codec::builder::build;
    use quadfa::io::cli::{Cli, Command, CommandProcessor};
    use quadfa::io::configuration::DEFAULT_RESOLUTION;
    use quadfa::io::image::{export_bit_image, load_bit_image};
    use quadfa::io::wire::{deserialize_dfa, serialize_dfa};
    use std::fs;
    use std::path::{Path, PathBuf};

    fn sample_image() -> Array2<u8> {
        array![[1, 1, 1, 1], [1, 0, 1, 0], [0, 1, 0, 1], [1, 1, 1, 1]]
    }

    fn run(args: &[&str]) -> quadfa::Result<Vec<String>> {
        let cli = Cli::parse_from(std::iter::once("quadfa").chain(args.iter().copied()));
        CommandProcessor::new(cli).process()
    }

    fn text(path: &Path) -> &str {
        path.to_str().expect("temp paths are UTF-8")
    }

    // Tests encode parsing with defaults
    // Verified by changing the no-skip default
    #[test]
    fn test_cli_parse_encode() {
        let cli = Cli::parse_from(["quadfa", "encode", "images"]);
        assert!(!cli.quiet);
        assert!(cli.should_show_progress());
        assert_eq!(cli.default_log_level(), "info");
        assert_eq!(
            cli.command,
            Command::Encode {
                target: PathBuf::from("images"),
                no_skip: false,
            }
        );
    }

    // Tests decode parsing with default and explicit resolution
    // Verified by changing the default resolution
    #[test]
    fn test_cli_parse_decode() {
        let cli = Cli::parse_from(["quadfa", "decode", "fa.json"]);
        assert_eq!(
            cli.command,
            Command::Decode {
                automaton: PathBuf::from("fa.json"),
                resolution: DEFAULT_RESOLUTION,
                output: None,
            }
        );

        let cli = Cli::parse_from(["quadfa", "-q", "decode", "fa.json", "-r", "16", "-o", "x.png"]);
        assert!(cli.quiet);
        assert_eq!(cli.default_log_level(), "warn");
        assert_eq!(
            cli.command,
            Command::Decode {
                automaton: PathBuf::from("fa.json"),
                resolution: 16,
                output: Some(PathBuf::from("x.png")),
            }
        );
    }

    // Tests best parsing collects several values per flag
    // Verified by limiting flags to one value
    #[test]
    fn test_cli_parse_best() {
        let cli = Cli::parse_from([
            "quadfa", "best", "--automata", "a.json", "b.json", "--images", "x.png",
        ]);
        assert_eq!(
            cli.command,
            Command::Best {
                automata: vec![PathBuf::from("a.json"), PathBuf::from("b.json")],
                images: vec![PathBuf::from("x.png")],
            }
        );
        assert!(Cli::try_parse_from(["quadfa", "best", "--images", "x.png"]).is_err());
    }

    // Tests output naming beside the input
    // Verified by dropping the parent directory
    #[test]
    fn test_output_paths() {
        assert_eq!(
            CommandProcessor::get_automaton_path(Path::new("dir/cat.png")),
            PathBuf::from("dir/cat_automaton.json")
        );
        assert_eq!(
            CommandProcessor::get_decoded_path(Path::new("dir/cat_automaton.json")),
            PathBuf::from("dir/cat_automaton_decoded.png")
        );
    }

    // Tests encoding a directory and skipping existing outputs
    // Verified by ignoring the skip flag
    #[test]
    fn test_encode_directory() {
        let dir = tempfile::tempdir().expect("temp dir");
        let image_path = dir.path().join("sample.png");
        export_bit_image(&sample_image(), &image_path).expect("export succeeds");

        let report = run(&["-q", "encode", text(dir.path())]).expect("encode succeeds");
        assert_eq!(report.len(), 1);
        assert!(report[0].contains("5 states"));

        let automaton_path = dir.path().join("sample_automaton.json");
        let written = fs::read_to_string(&automaton_path).expect("automaton written");
        let parsed = deserialize_dfa(&written).expect("valid document");
        assert_eq!(parsed, build(sample_image().view()).expect("valid image"));

        let again = run(&["-q", "encode", text(dir.path())]).expect("encode succeeds");
        assert!(again.is_empty());

        let forced = run(&["-q", "encode", "--no-skip", text(&image_path)]).expect("encode succeeds");
        assert_eq!(forced.len(), 1);
    }

    // Tests encoding rejects rasters without a quadtree shape
    // Verified by encoding any image size
    #[test]
    fn test_encode_rejects_bad_shape() {
        let dir = tempfile::tempdir().expect("temp dir");
        let image_path = dir.path().join("odd.png");
        export_bit_image(&Array2::<u8>::ones((3, 3)), &image_path).expect("export succeeds");

        let result = run(&["-q", "encode", text(&image_path)]);
        assert!(matches!(result, Err(QuadfaError::InvalidSourceData { .. })));

        let note = dir.path().join("note.txt");
        fs::write(&note, "not an image").expect("write succeeds");
        let result = run(&["-q", "encode", text(&note)]);
        assert!(matches!(result, Err(QuadfaError::InvalidParameter { .. })));
    }

    // Tests decoding renders the encoded image
    // Verified by writing the output before rendering
    #[test]
    fn test_decode_round_trip() {
        let dir = tempfile::tempdir().expect("temp dir");
        let automaton_path = dir.path().join("sample_automaton.json");
        let dfa = build(sample_image().view()).expect("valid image");
        fs::write(&automaton_path, serialize_dfa(&dfa).expect("initial set")).expect("write");

        run(&["-q", "decode", text(&automaton_path), "--resolution", "4"])
            .expect("decode succeeds");

        let decoded = load_bit_image(dir.path().join("sample_automaton_decoded.png"))
            .expect("decoded image written");
        assert_eq!(decoded, sample_image());
    }

    // Tests decode parameter and file errors
    // Verified by accepting any resolution
    #[test]
    fn test_decode_errors() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("missing.json");

        for resolution in ["3", "8192", "0"] {
            let result = run(&["-q", "decode", text(&missing), "-r", resolution]);
            assert!(
                matches!(result, Err(QuadfaError::InvalidParameter { .. })),
                "resolution {resolution} should be rejected"
            );
        }

        let result = run(&["-q", "decode", text(&missing)]);
        assert!(matches!(result, Err(QuadfaError::FileSystem { .. })));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{}").expect("write succeeds");
        let result = run(&["-q", "decode", text(&broken)]);
        match result {
            Err(QuadfaError::MalformedWireFormat { path, .. }) => {
                assert_eq!(path.as_deref(), Some(broken.as_path()));
            }
            _ => unreachable!("Expected MalformedWireFormat error type"),
        }
    }

    // Tests match reporting and best-fit selection from files
    // Verified by reporting the rejected count
    #[test]
    fn test_match_and_best() {
        let dir = tempfile::tempdir().expect("temp dir");
        let image_path = dir.path().join("sample.png");
        export_bit_image(&sample_image(), &image_path).expect("export succeeds");

        let own_path = dir.path().join("own.json");
        let own = build(sample_image().view()).expect("valid image");
        fs::write(&own_path, serialize_dfa(&own).expect("initial set")).expect("write");

        let blank_path = dir.path().join("blank.json");
        let blank = build(Array2::<u8>::zeros((4, 4)).view()).expect("valid image");
        fs::write(&blank_path, serialize_dfa(&blank).expect("initial set")).expect("write");

        let report = run(&["-q", "match", text(&own_path), text(&image_path)]).expect("match");
        assert_eq!(report, vec!["100.00% (12/12)".to_string(), "true".to_string()]);

        let report = run(&["-q", "match", text(&blank_path), text(&image_path)]).expect("match");
        assert_eq!(report, vec!["0.00% (0/12)".to_string(), "false".to_string()]);

        let report = run(&[
            "-q",
            "best",
            "--automata",
            text(&blank_path),
            text(&own_path),
            "--images",
            text(&image_path),
        ])
        .expect("best");
        assert_eq!(report, vec![format!("{}: 1", image_path.display())]);
    }
}
