//! Shortest edit script between two line sequences (Myers, O((N+M)D) time,
//! linear space).

/// One step of an edit script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit<'a> {
    /// Line present in both sequences.
    Equal(&'a str),
    /// Line present only in the new sequence.
    Insert(&'a str),
    /// Line present only in the old sequence.
    Delete(&'a str),
}

/// Compute a minimal edit script turning `old` into `new`.
///
/// Every line of `new` appears exactly once in the script as `Equal` or
/// `Insert`, and every line of `old` exactly once as `Equal` or `Delete`.
/// Each range is split at its middle snake and both halves are solved in
/// turn, so working memory stays linear in `old.len() + new.len()`.
pub fn diff_lines<'a>(old: &[&'a str], new: &[&'a str]) -> Vec<Edit<'a>> {
    let mut script = Vec::with_capacity(old.len() + new.len());
    let size = max_d(old.len(), new.len());
    let mut forward = Diagonals::new(size);
    let mut backward = Diagonals::new(size);
    conquer(old, new, &mut forward, &mut backward, &mut script);
    script
}

/// Furthest x reached per diagonal k, for k in `-max_d..=max_d`.
struct Diagonals {
    cells: Vec<usize>,
    offset: isize,
}

impl Diagonals {
    fn new(max_d: usize) -> Self {
        Self {
            cells: vec![0; 2 * max_d + 1],
            offset: max_d as isize,
        }
    }

    fn get(&self, k: isize) -> usize {
        self.cells[(k + self.offset) as usize]
    }

    fn set(&mut self, k: isize, x: usize) {
        self.cells[(k + self.offset) as usize] = x;
    }
}

fn max_d(n: usize, m: usize) -> usize {
    (n + m + 1) / 2 + 1
}

fn common_prefix(old: &[&str], new: &[&str]) -> usize {
    old.iter().zip(new).take_while(|(a, b)| a == b).count()
}

fn common_suffix(old: &[&str], new: &[&str]) -> usize {
    old.iter()
        .rev()
        .zip(new.iter().rev())
        .take_while(|(a, b)| a == b)
        .count()
}

fn conquer<'a>(
    old: &[&'a str],
    new: &[&'a str],
    forward: &mut Diagonals,
    backward: &mut Diagonals,
    script: &mut Vec<Edit<'a>>,
) {
    let prefix = common_prefix(old, new);
    script.extend(old[..prefix].iter().map(|line| Edit::Equal(*line)));
    let (old, new) = (&old[prefix..], &new[prefix..]);

    let suffix = common_suffix(old, new);
    let tail = &old[old.len() - suffix..];
    let (old, new) = (&old[..old.len() - suffix], &new[..new.len() - suffix]);

    if old.is_empty() {
        script.extend(new.iter().map(|line| Edit::Insert(*line)));
    } else if new.is_empty() {
        script.extend(old.iter().map(|line| Edit::Delete(*line)));
    } else if let Some((x, y)) = middle_snake(old, new, forward, backward) {
        conquer(&old[..x], &new[..y], forward, backward, script);
        conquer(&old[x..], &new[y..], forward, backward, script);
    } else {
        script.extend(old.iter().map(|line| Edit::Delete(*line)));
        script.extend(new.iter().map(|line| Edit::Insert(*line)));
    }

    script.extend(tail.iter().map(|line| Edit::Equal(*line)));
}

/// Run the forward and backward searches until their paths overlap and return
/// the point where the overlapping snake starts. `old` and `new` must be
/// non-empty with no common prefix or suffix, so the point always lies strictly
/// between the two corners.
fn middle_snake(
    old: &[&str],
    new: &[&str],
    forward: &mut Diagonals,
    backward: &mut Diagonals,
) -> Option<(usize, usize)> {
    let n = old.len();
    let m = new.len();
    let delta = n as isize - m as isize;
    let odd = delta & 1 == 1;
    forward.set(1, 0);
    backward.set(1, 0);

    for d in 0..max_d(n, m) as isize {
        let mut k = d;
        while k >= -d {
            let mut x = if k == -d || (k != d && forward.get(k - 1) < forward.get(k + 1)) {
                forward.get(k + 1)
            } else {
                forward.get(k - 1) + 1
            };
            let y = (x as isize - k) as usize;
            let start = (x, y);
            if x < n && y < m {
                x += common_prefix(&old[x..], &new[y..]);
            }
            forward.set(k, x);
            if odd && (k - delta).abs() < d && x + backward.get(delta - k) >= n {
                return Some(start);
            }
            k -= 2;
        }

        let mut k = d;
        while k >= -d {
            let mut x = if k == -d || (k != d && backward.get(k - 1) < backward.get(k + 1)) {
                backward.get(k + 1)
            } else {
                backward.get(k - 1) + 1
            };
            let mut y = (x as isize - k) as usize;
            if x < n && y < m {
                let run = common_suffix(&old[..n - x], &new[..m - y]);
                x += run;
                y += run;
            }
            backward.set(k, x);
            if !odd && (k - delta).abs() <= d && x + forward.get(delta - k) >= n {
                return Some((n - x, m - y));
            }
            k -= 2;
        }
    }
    None
}
