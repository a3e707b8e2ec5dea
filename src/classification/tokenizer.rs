//! 英語テキストの正規化とトークン化。
use regex::Regex;
use rustc_hash::FxHashSet;

/// 除外するストップワード。集合の中身は出力の再現性に関わるため固定。
pub const STOPWORDS: [&str; 44] = [
    "the", "and", "is", "in", "at", "of", "a", "to", "it", "for", "on", "with", "this", "that",
    "an", "as", "are", "was", "but", "be", "by", "not", "or", "from", "so", "if", "they", "you",
    "we", "he", "she", "her", "his", "them", "their", "our", "i", "me", "my", "your", "yours",
    "ours", "ourselves", "yourselves",
];

/// 生テキストを正規化済みトークン列に変換する。
///
/// 1. ASCII英数字・空白・`,.?!` 以外を空白に置換して小文字化
/// 2. 空白の連続で分割（空文字列は捨てる）
/// 3. ストップワード除去
/// 4. 末尾の `ing|ed|ly|es|s` を一度だけ除去
///
/// 語幹処理は意図的に粗いヒューリスティックのままにしている。
/// 接尾辞だけの語（例: `"s"`）は空トークンになるが、そのまま残す。
#[derive(Debug)]
pub struct Normalizer {
    strip_re: Regex,
    split_re: Regex,
    suffix_re: Regex,
    stopwords: FxHashSet<&'static str>,
}

impl Normalizer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            strip_re: Regex::new(r"[^a-zA-Z0-9 ,.?!\s]").expect("compile strip pattern"),
            split_re: Regex::new(r"\s+").expect("compile split pattern"),
            suffix_re: Regex::new(r"(ing|ed|ly|es|s)$").expect("compile suffix pattern"),
            stopwords: STOPWORDS.into_iter().collect(),
        }
    }

    /// テキストを順序と重複を保ったままトークン化する。`None` は空列。
    #[must_use]
    pub fn normalize(&self, text: Option<&str>) -> Vec<String> {
        let Some(text) = text else {
            return Vec::new();
        };
        let cleaned = self.strip_re.replace_all(text, " ").to_lowercase();
        self.split_re
            .split(&cleaned)
            .filter(|word| !word.is_empty() && !self.stopwords.contains(*word))
            .map(|word| self.stem(word))
            .collect()
    }

    /// 文書内の異なり語の集合。学習・推論ともに出現回数ではなく有無だけを使う。
    #[must_use]
    pub fn token_set(&self, text: Option<&str>) -> FxHashSet<String> {
        self.normalize(text).into_iter().collect()
    }

    fn stem(&self, word: &str) -> String {
        self.suffix_re.replace(word, "").into_owned()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}
