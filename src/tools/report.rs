use std::fmt::Write;

/// Shannon entropy of a histogram in bits per symbol. An empty histogram has entropy 0.
pub fn entropy(freqs: &[u64]) -> f64 {
    // Summed as f64 so huge counts cannot overflow
    let total: f64 = freqs.iter().map(|&f| f as f64).sum();
    if total == 0.0 {
        return 0.0;
    }
    -freqs
        .iter()
        .filter(|&&f| f > 0)
        .map(|&f| {
            let p = f as f64 / total;
            p * p.log2()
        })
        .sum::<f64>()
}

/// Lists the symbols that occur with their counts, four per line.
pub fn histogram_report(freqs: &[u64]) -> String {
    let mut out = String::new();
    let mut column = 0;
    for (sym, &count) in freqs.iter().enumerate().filter(|&(_, &c)| c > 0) {
        let sep = if column % 4 == 3 { "\n" } else { "    " };
        // Writing to a String cannot fail
        let _ = write!(out, "{:6} --> {:6}{}", sym, count, sep);
        column += 1;
    }
    if column % 4 != 0 {
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn entropy_test() {
        assert_eq!(entropy(&[0, 0, 0]), 0.0);
        assert_eq!(entropy(&[7, 0]), 0.0);
        assert!((entropy(&[1, 1]) - 1.0).abs() < 1e-12);
        assert!((entropy(&[1, 1, 1, 1, 0, 0]) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn histogram_report_test() {
        let mut freqs = vec![0_u64; 16];
        freqs[1] = 5;
        freqs[10] = 6;
        let report = histogram_report(&freqs);
        let expected = format!("{:6} --> {:6}    {:6} --> {:6}    \n", 1, 5, 10, 6);
        assert_eq!(report, expected);
        assert_eq!(histogram_report(&[0, 0]), "");
    }

    #[test]
    fn histogram_report_wraps_test() {
        let report = histogram_report(&[1; 5]);
        assert_eq!(report.lines().count(), 2);
    }
}
