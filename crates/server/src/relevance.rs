use std::collections::BTreeSet;

/// Score how well an evidence title matches the claim, 0.0–1.0.
///
/// Token overlap (Jaccard over lower-cased words) does the bulk of the
/// work; Jaro-Winkler over the whole strings catches near-identical
/// phrasings that tokenization splits differently. The final score is
/// the larger of the two, so neither signal can drag a strong match
/// down.
pub fn score(claim: &str, title: &str) -> f64 {
    let claim_tokens = tokens(claim);
    let title_tokens = tokens(title);

    if claim_tokens.is_empty() || title_tokens.is_empty() {
        return 0.0;
    }

    let intersection = claim_tokens.intersection(&title_tokens).count();
    let union = claim_tokens.union(&title_tokens).count();
    let jaccard = intersection as f64 / union as f64;

    let jw = strsim::jaro_winkler(&claim.to_lowercase(), &title.to_lowercase());
    // Jaro-Winkler is generous on unrelated short strings; only let it
    // dominate when it signals a genuinely close match.
    let jw = if jw >= 0.85 { jw } else { 0.0 };

    jaccard.max(jw).clamp(0.0, 1.0)
}

fn tokens(text: &str) -> BTreeSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() > 2)
        .map(str::to_lowercase)
        .collect()
}
