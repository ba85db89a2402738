use embedload_core::textgen::{generate_text, limit_length, TextGenerator, EXTRA_SENTENCES, TEMPLATES};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn generated_text_respects_limit_and_is_non_empty() {
    for max_len in [1, 2, 5, 12, 40, 80, 120, 200, 500] {
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let text = generate_text(&mut rng, max_len);
            assert!(!text.is_empty(), "empty text for seed {seed}, max {max_len}");
            assert!(text.chars().count() <= max_len, "{text:?} exceeds {max_len}");
        }
    }
}

#[test]
fn same_seed_gives_same_sequence() {
    let mut a = TextGenerator::new(200, Some(42));
    let mut b = TextGenerator::new(200, Some(42));
    assert_eq!(a.batch(10), b.batch(10));
}

#[test]
fn generated_text_comes_from_a_template() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..100 {
        let text = generate_text(&mut rng, 1_000);
        assert!(!text.contains('{'), "unfilled placeholder in {text:?}");
        let template = TEMPLATES
            .iter()
            .find(|t| {
                let prefix = &t.text[..t.text.find('{').unwrap()];
                text.starts_with(prefix)
            })
            .expect("matching template");
        let filled = template
            .slot
            .vocabulary()
            .iter()
            .map(|v| template.text.replace(template.slot.placeholder(), v))
            .find(|s| text.starts_with(s.as_str()))
            .expect("known filler");
        let rest = &text[filled.len()..];
        assert!(rest.is_empty() || EXTRA_SENTENCES.contains(&rest), "unexpected tail {rest:?}");
    }
}

#[test]
fn extra_sentence_appears_sometimes_but_not_always() {
    let mut rng = StdRng::seed_from_u64(1);
    let with_extra = (0..1_000)
        .map(|_| generate_text(&mut rng, 1_000))
        .filter(|t| EXTRA_SENTENCES.iter().any(|e| t.ends_with(e)))
        .count();
    assert!(with_extra > 150 && with_extra < 450, "extra sentence ratio off: {with_extra}/1000");
}

#[test]
fn short_text_is_untouched() {
    let text = "Financial markets are influenced by economic indicators and inflation rates.".to_string();
    assert_eq!(limit_length(text.clone(), text.len()), text);
    assert_eq!(limit_length(text.clone(), 200), text);
}

#[test]
fn truncation_cuts_at_last_space_and_adds_period() {
    assert_eq!(limit_length("hello world foo".to_string(), 12), "hello world.");
    assert_eq!(limit_length("hello world foo".to_string(), 11), "hello.");
    assert_eq!(limit_length("hello world foo".to_string(), 14), "hello world.");
}

#[test]
fn truncation_never_splits_a_word() {
    let original = "Machine learning models require large datasets and computational resources for training algorithms. Research shows significant improvements in efficiency.";
    for max_len in 10..original.len() {
        let cut = limit_length(original.to_string(), max_len);
        assert!(cut.len() <= max_len);
        assert!(cut.ends_with('.'));
        let body = &cut[..cut.len() - 1];
        assert!(original.starts_with(body));
        assert_eq!(original.as_bytes()[body.len()], b' ', "cut mid-word at {max_len}: {cut:?}");
    }
}

#[test]
fn truncation_without_spaces_still_fits() {
    assert_eq!(limit_length("abcdefghij".to_string(), 5), "abcd.");
    assert_eq!(limit_length("abcdefghij".to_string(), 1), ".");
    assert_eq!(limit_length("abc".to_string(), 0), "");
}
