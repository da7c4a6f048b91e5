use quantpro_rank::{Bm25Engine, Bm25Index, Bm25Params};

fn fitted(documents: &[&str]) -> Bm25Engine {
    let mut engine = Bm25Engine::new(Bm25Params::default());
    engine.fit(documents);
    engine
}

#[test]
fn single_term_score_matches_hand_computation() {
    let engine = fitted(&["rsi momentum oscillator", "bollinger bands volatility"]);
    let scores = engine.score("RSI");

    assert_eq!(scores.len(), 2);
    // df = 1 of 2 documents, tf = 1, docLen == avgdl: the tf part reduces to 1.
    let expected = (1.5f64 / 1.5 + 1.0).ln();
    assert!((scores[0].score - expected).abs() < 1e-12, "got {}", scores[0].score);
    assert_eq!(scores[1].score, 0.0);
    assert_eq!(scores[0].index, 0);
    assert_eq!(scores[1].index, 1);
}

#[test]
fn idf_is_positive_and_rewards_rare_terms() {
    let index = Bm25Index::fit(&[
        "trend following momentum",
        "trend mean reversion",
        "trend pairs arbitrage",
        "trend kalman filter",
    ]);
    let common = index.idf("trend").expect("in every document");
    let rare = index.idf("kalman").expect("in one document");
    assert!(common > 0.0);
    assert!(rare > common);
    for term in ["following", "momentum", "mean", "reversion", "pairs", "arbitrage", "filter"] {
        assert!(index.idf(term).expect(term) > 0.0);
    }
}

#[test]
fn higher_term_frequency_never_lowers_the_score() {
    // Every candidate document has six tokens, so only tf changes between fits.
    let mut previous = 0.0;
    for tf in 1..=6 {
        let mut words = vec!["alpha"; tf];
        words.extend(std::iter::repeat("filler").take(6 - tf));
        let doc = words.join(" ");
        let engine = fitted(&[doc.as_str(), "unrelated document about risk limits today"]);
        let score = engine.score("alpha")[0].score;
        assert!(score >= previous, "tf={tf}: {score} < {previous}");
        previous = score;
    }
}

#[test]
fn longer_documents_score_lower_for_the_same_tf() {
    let engine = fitted(&["atr stop", "atr stop with several extra padding words here"]);
    let scores = engine.score("atr");
    assert!(scores[0].score > scores[1].score);
}

#[test]
fn b_zero_disables_length_normalisation() {
    let mut engine = Bm25Engine::new(Bm25Params { k1: 1.2, b: 0.0 });
    engine.fit(&["atr stop", "atr stop with several extra padding words here"]);
    let scores = engine.score("atr");
    assert!((scores[0].score - scores[1].score).abs() < 1e-12);
}

#[test]
fn repeated_query_terms_count_once() {
    let engine = fitted(&["kelly criterion sizing", "fixed fractional sizing"]);
    assert_eq!(engine.score("kelly"), engine.score("kelly KELLY kelly"));
}

#[test]
fn unknown_terms_contribute_nothing() {
    let engine = fitted(&["vwap execution", "twap execution"]);
    let scores = engine.score("zzz_no_such_term");
    assert_eq!(scores.len(), 2);
    assert!(scores.iter().all(|s| s.score == 0.0));
}

#[test]
fn scoring_is_idempotent() {
    let engine = fitted(&["order book imbalance", "order flow toxicity", "book pressure"]);
    let first = engine.score("order book");
    let second = engine.score("order book");
    assert_eq!(first, second);
}

#[test]
fn unfit_and_empty_engines_return_nothing() {
    let engine = Bm25Engine::new(Bm25Params::default());
    assert!(engine.score("rsi").is_empty());

    let engine = fitted(&[]);
    assert!(engine.index().is_empty());
    assert_eq!(engine.index().avgdl(), 0.0);
    assert!(engine.score("rsi").is_empty());
}

#[test]
fn documents_without_tokens_score_zero_not_nan() {
    let engine = fitted(&["a b", "-- !!"]);
    let scores = engine.score("a b");
    assert_eq!(scores.len(), 2);
    assert!(scores.iter().all(|s| s.score == 0.0));
}

#[test]
fn refit_replaces_the_collection() {
    let mut engine = fitted(&["macd crossover"]);
    engine.fit(&["ema ribbon", "sma crossover", "obv volume"]);
    assert_eq!(engine.index().len(), 3);
    assert_eq!(engine.score("macd").iter().filter(|s| s.score > 0.0).count(), 0);
    assert!(engine.score("crossover")[1].score > 0.0);
}
