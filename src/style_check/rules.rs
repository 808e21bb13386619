// src/style_check/rules.rs
use once_cell::sync::Lazy;
use regex::Regex;

use super::{Severity, Violation};
use crate::ingest::truncate_chars;

static RE_SENTENCE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"[。！？\n]").unwrap());
static RE_SENTENCE_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"[。！？]").unwrap());
static RE_DESU_MASU: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(です|ます|ました|ません|でした|でしょう)$").unwrap());
static RE_DA_DEARU: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(だ|である|だった|ない|た|る)$").unwrap());
// progressive / passive endings are not plain form
static RE_DA_DEARU_EXEMPT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(ている|される|られる|している)$").unwrap());

/// (short form pattern, long form pattern, label "short/long")
const NOTATION_PAIRS: &[(&str, &str, &str)] = &[
    ("サーバ[^ー]", "サーバー", "サーバ/サーバー"),
    ("ユーザ[^ー]", "ユーザー", "ユーザ/ユーザー"),
    ("コンピュータ[^ー]", "コンピューター", "コンピュータ/コンピューター"),
    ("プリンタ[^ー]", "プリンター", "プリンタ/プリンター"),
    ("ブラウザ[^ー]", "ブラウザー", "ブラウザ/ブラウザー"),
    ("フォルダ[^ー]", "フォルダー", "フォルダ/フォルダー"),
];

/// (pattern, flagged form, preferred form)
const REDUNDANT: &[(&str, &str, &str)] = &[
    ("することができ(る|ます)", "〜することができる", "〜できる"),
    ("ということ", "〜ということ", "〜こと（または削除）"),
    ("についての", "〜についての", "〜の"),
    ("によって行(う|われ)", "〜によって行う", "〜で行う/〜する"),
    ("を行(う|い)", "〜を行う", "〜する"),
];

const DOUBLE_HONORIFICS: &[(&str, &str, &str)] = &[
    ("おっしゃられ", "おっしゃられる", "おっしゃる"),
    ("お見えになられ", "お見えになられる", "お見えになる/いらっしゃる"),
    ("お帰りになられ", "お帰りになられる", "お帰りになる"),
    ("ご覧になられ", "ご覧になられる", "ご覧になる"),
    ("お召し上がりになられ", "お召し上がりになられる", "召し上がる"),
];

struct ContextRule {
    re: Regex,
    /// Same pattern with up to N chars of context on each side.
    around: Regex,
    bad: &'static str,
    good: &'static str,
}

fn compile_context_rules(
    table: &[(&str, &'static str, &'static str)],
    ctx: usize,
) -> Vec<ContextRule> {
    table
        .iter()
        .map(|&(pat, bad, good)| ContextRule {
            re: Regex::new(pat).unwrap(),
            around: Regex::new(&format!(".{{0,{ctx}}}{pat}.{{0,{ctx}}}")).unwrap(),
            bad,
            good,
        })
        .collect()
}

static REDUNDANT_RULES: Lazy<Vec<ContextRule>> = Lazy::new(|| compile_context_rules(REDUNDANT, 20));
static HONORIFIC_RULES: Lazy<Vec<ContextRule>> =
    Lazy::new(|| compile_context_rules(DOUBLE_HONORIFICS, 15));
static NOTATION_RULES: Lazy<Vec<(Regex, Regex, &'static str)>> = Lazy::new(|| {
    NOTATION_PAIRS
        .iter()
        .map(|(short, long, label)| (Regex::new(short).unwrap(), Regex::new(long).unwrap(), *label))
        .collect()
});

fn sentences<'a>(text: &'a str, splitter: &Regex) -> Vec<&'a str> {
    splitter
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// OFFLINE001: です・ます調 and だ・である調 both used at least twice.
pub fn check_style_consistency(text: &str) -> Vec<Violation> {
    let mut polite: Vec<&str> = Vec::new();
    let mut plain: Vec<&str> = Vec::new();

    for s in sentences(text, &RE_SENTENCE_BREAK) {
        if RE_DESU_MASU.is_match(s) {
            polite.push(s);
        } else if RE_DA_DEARU.is_match(s) && !RE_DA_DEARU_EXEMPT.is_match(s) {
            // `else`: "ました" also ends in "た" and must not count twice
            plain.push(s);
        }
    }

    if polite.len() < 2 || plain.len() < 2 {
        return Vec::new();
    }

    vec![Violation {
        rule_id: "OFFLINE001".into(),
        rule_name: "語尾の統一".into(),
        location: format!(
            "です・ます調: 「{}...」など{}件 / だ・である調: 「{}...」など{}件",
            truncate_chars(polite[0], 30),
            polite.len(),
            truncate_chars(plain[0], 30),
            plain.len()
        ),
        reason: "「です・ます調」と「だ・である調」が混在しています".into(),
        suggestion: "どちらか一方の文体に統一してください".into(),
        severity: Severity::High,
    }]
}

/// OFFLINE002: both the short and the long-vowel spelling of a word appear.
pub fn check_notation_inconsistency(text: &str) -> Vec<Violation> {
    NOTATION_RULES
        .iter()
        .filter_map(|(short, long, label)| {
            let n_short = short.find_iter(text).count();
            let n_long = long.find_iter(text).count();
            if n_short == 0 || n_long == 0 {
                return None;
            }
            let preferred = label.split('/').nth(1).unwrap_or(*label);
            Some(Violation {
                rule_id: "OFFLINE002".into(),
                rule_name: "表記ゆれ".into(),
                location: format!(
                    "「{label}」が混在（短い表記: {n_short}件、長い表記: {n_long}件）"
                ),
                reason: "同じ単語の表記が統一されていません".into(),
                suggestion: format!(
                    "「{preferred}」のように長音記号ありで統一することをおすすめします"
                ),
                severity: Severity::Medium,
            })
        })
        .collect()
}

/// OFFLINE003: wordy constructions with a shorter equivalent.
pub fn check_redundant_expressions(text: &str) -> Vec<Violation> {
    REDUNDANT_RULES
        .iter()
        .filter_map(|r| {
            let count = r.re.find_iter(text).count();
            if count == 0 {
                return None;
            }
            let location = r.around.find(text).map_or(r.bad, |m| m.as_str());
            Some(Violation {
                rule_id: "OFFLINE003".into(),
                rule_name: "冗長表現".into(),
                location: format!("「{location}」など{count}件"),
                reason: format!("「{}」は冗長な表現です", r.bad),
                suggestion: format!("「{}」のように簡潔に書き換えてください", r.good),
                severity: Severity::Low,
            })
        })
        .collect()
}

/// OFFLINE004: honorific verb combined with a second honorific form.
pub fn check_double_honorifics(text: &str) -> Vec<Violation> {
    HONORIFIC_RULES
        .iter()
        .filter(|r| r.re.is_match(text))
        .map(|r| {
            let location = r.around.find(text).map_or(r.bad, |m| m.as_str());
            Violation {
                rule_id: "OFFLINE004".into(),
                rule_name: "二重敬語".into(),
                location: format!("「{location}」"),
                reason: format!("「{}」は二重敬語です", r.bad),
                suggestion: format!("「{}」が正しい敬語です", r.good),
                severity: Severity::Medium,
            }
        })
        .collect()
}

/// OFFLINE005: one violation summarizing every sentence over `max_chars`.
pub fn check_long_sentences(text: &str, max_chars: usize) -> Vec<Violation> {
    let long: Vec<&str> = sentences(text, &RE_SENTENCE_END)
        .into_iter()
        .filter(|s| s.chars().count() > max_chars)
        .collect();
    let Some(first) = long.first() else {
        return Vec::new();
    };

    vec![Violation {
        rule_id: "OFFLINE005".into(),
        rule_name: "長すぎる文".into(),
        location: format!("「{}...」など{}件", truncate_chars(first, 50), long.len()),
        reason: format!("{max_chars}文字を超える長い文があります"),
        suggestion: "文を分割して読みやすくしてください".into(),
        severity: Severity::Low,
    }]
}
