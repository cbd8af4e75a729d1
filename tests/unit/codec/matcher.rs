//! Tests for match scoring and best-fit selection

#[cfg(test)]
mod tests {
    use ndarray::{Array2, array};
    use quadfa::codec::builder::build;
    use quadfa::codec::matcher::{MatchReport, score, select_best, select_best_batch, verify};

    fn sample_image() -> Array2<u8> {
        array![[1, 1, 1, 1], [1, 0, 1, 0], [0, 1, 0, 1], [1, 1, 1, 1]]
    }

    // Tests an image scores fully against its own automaton
    // Verified by counting rejected addresses as matches
    #[test]
    fn test_verify_own_image() {
        let image = sample_image();
        let dfa = build(image.view()).expect("valid image");
        let report = verify(&dfa, image.view()).expect("total automaton");

        assert_eq!(report, MatchReport { matched: 12, total: 12 });
        assert!(report.all_accepted());
        assert!((report.percentage() - 100.0).abs() < f64::EPSILON);
    }

    // Tests partial scores count only on cells of the tested image
    // Verified by dividing by the image area
    #[test]
    fn test_score_partial_match() {
        let dfa = build(sample_image().view()).expect("valid image");
        let mut extra = sample_image();
        extra[[1, 1]] = 1;

        let report = verify(&dfa, extra.view()).expect("total automaton");
        assert_eq!(report.matched, 12);
        assert_eq!(report.total, 13);
        assert!(!report.all_accepted());

        let fraction = score(&dfa, extra.view()).expect("total automaton");
        assert!((fraction - 12.0 / 13.0).abs() < 1e-12);
    }

    // Tests images without on cells score zero
    // Verified by returning NaN for an empty address set
    #[test]
    fn test_score_empty_image() {
        let dfa = build(sample_image().view()).expect("valid image");
        let blank = Array2::<u8>::zeros((4, 4));
        let fraction = score(&dfa, blank.view()).expect("total automaton");
        assert!(fraction.abs() < f64::EPSILON);

        let report = MatchReport {
            matched: 0,
            total: 0,
        };
        assert!(report.ratio().abs() < f64::EPSILON);
        assert!(report.all_accepted());
    }

    // Tests selection of the highest scoring candidate
    // Verified by selecting the last candidate
    #[test]
    fn test_select_best_picks_highest() {
        let image = sample_image();
        let blank = build(Array2::<u8>::zeros((4, 4)).view()).expect("valid image");
        let own = build(image.view()).expect("valid image");
        let full = build(Array2::<u8>::ones((4, 4)).view()).expect("valid image");

        let choice = select_best(&[blank.clone(), own.clone()], image.view()).expect("total");
        assert_eq!(choice, Some(1));

        // The full image accepts every address, tying with the exact match
        let choice = select_best(&[full, own, blank], image.view()).expect("total");
        assert_eq!(choice, Some(0));
    }

    // Tests no candidates give no selection and zero scores still select
    // Verified by initializing the best score at zero
    #[test]
    fn test_select_best_edge_cases() {
        let image = sample_image();
        assert_eq!(select_best(&[], image.view()).expect("nothing to run"), None);

        let blank = build(Array2::<u8>::zeros((4, 4)).view()).expect("valid image");
        assert_eq!(
            select_best(&[blank], image.view()).expect("total automaton"),
            Some(0)
        );
    }

    // Tests batch selection runs per image
    // Verified by reusing the first image's choice
    #[test]
    fn test_select_best_batch() {
        let first = sample_image();
        let second = array![[0_u8, 0, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]];
        let candidates = [
            build(first.view()).expect("valid image"),
            build(second.view()).expect("valid image"),
        ];

        let choices = select_best_batch(&candidates, &[first, second]).expect("total");
        assert_eq!(choices, vec![Some(0), Some(1)]);
    }
}
