//! Title normalization and edit-distance similarity

/// Canonical form used for every title comparison
///
/// Lower-cases, folds accented Latin vowels, `ñ` and `ç` to their base
/// letter, turns whitespace into plain spaces, drops everything else outside
/// `[a-z0-9 ]` and trims. Applying it twice gives the same result.
pub fn normalize(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars().flat_map(char::to_lowercase) {
        let folded = match c {
            'à' | 'á' | 'ä' | 'â' | 'ã' | 'å' => 'a',
            'è' | 'é' | 'ë' | 'ê' => 'e',
            'ì' | 'í' | 'ï' | 'î' => 'i',
            'ò' | 'ó' | 'ö' | 'ô' | 'õ' => 'o',
            'ù' | 'ú' | 'ü' | 'û' => 'u',
            'ñ' => 'n',
            'ç' => 'c',
            c if c.is_whitespace() => ' ',
            c => c,
        };
        if folded.is_ascii_lowercase() || folded.is_ascii_digit() || folded == ' ' {
            out.push(folded);
        }
    }
    out.trim().to_string()
}

/// True when either normalized string contains the other
pub fn contains_either(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

/// Levenshtein scorer with reusable row buffers
///
/// Keep one around when scoring many pairs; each call only grows the buffers
/// when a longer string shows up.
#[derive(Debug, Default)]
pub struct SimilarityScorer {
    a: Vec<char>,
    b: Vec<char>,
    prev: Vec<usize>,
    curr: Vec<usize>,
}

impl SimilarityScorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Levenshtein distance with unit costs, counted in characters
    pub fn edit_distance(&mut self, a: &str, b: &str) -> usize {
        self.a.clear();
        self.a.extend(a.chars());
        self.b.clear();
        self.b.extend(b.chars());

        let (m, n) = (self.a.len(), self.b.len());
        if m == 0 {
            return n;
        }
        if n == 0 {
            return m;
        }

        // Rows run over `b`, columns over `a`
        self.prev.clear();
        self.prev.extend(0..=m);
        self.curr.clear();
        self.curr.resize(m + 1, 0);

        for i in 1..=n {
            self.curr[0] = i;
            for j in 1..=m {
                let cost = if self.b[i - 1] == self.a[j - 1] { 0 } else { 1 };
                self.curr[j] = (self.prev[j] + 1)
                    .min(self.curr[j - 1] + 1)
                    .min(self.prev[j - 1] + cost);
            }
            std::mem::swap(&mut self.prev, &mut self.curr);
        }

        self.prev[m]
    }

    /// `(maxLen - distance) / maxLen`, or 1.0 when both strings are empty
    pub fn similarity(&mut self, a: &str, b: &str) -> f64 {
        let max_len = a.chars().count().max(b.chars().count());
        if max_len == 0 {
            return 1.0;
        }
        let distance = self.edit_distance(a, b);
        (max_len - distance) as f64 / max_len as f64
    }
}

pub fn edit_distance(a: &str, b: &str) -> usize {
    SimilarityScorer::new().edit_distance(a, b)
}

pub fn similarity(a: &str, b: &str) -> f64 {
    SimilarityScorer::new().similarity(a, b)
}
