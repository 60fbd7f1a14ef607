//! Run summary reporting

/// What one scrape run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Page count the paginator reported
    pub total_pages: u32,

    /// Listing pages fetched successfully
    pub pages_fetched: usize,

    /// Listing pages dropped after exhausting retries
    pub pages_dropped: usize,

    /// Records written to the CSV file
    pub records_written: usize,
}

impl RunSummary {
    /// Fraction of reported pages that made it into the result set
    pub fn page_success_rate(&self) -> f64 {
        if self.total_pages == 0 {
            return 0.0;
        }
        (self.pages_fetched as f64 / self.total_pages as f64) * 100.0
    }
}

/// Prints a run summary to stdout in a formatted manner
pub fn print_summary(summary: &RunSummary) {
    println!("=== Scrape Summary ===\n");

    println!("  Listing pages reported: {}", summary.total_pages);
    println!(
        "  Listing pages fetched: {} ({:.1}%)",
        summary.pages_fetched,
        summary.page_success_rate()
    );
    if summary.pages_dropped > 0 {
        println!("  Listing pages dropped: {}", summary.pages_dropped);
    }
    println!("  Records written: {}", summary.records_written);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_success_rate() {
        let summary = RunSummary {
            total_pages: 50,
            pages_fetched: 40,
            pages_dropped: 10,
            records_written: 800,
        };

        assert!((summary.page_success_rate() - 80.0).abs() < 0.01);
    }

    #[test]
    fn test_page_success_rate_zero_pages() {
        let summary = RunSummary {
            total_pages: 0,
            pages_fetched: 0,
            pages_dropped: 0,
            records_written: 0,
        };

        assert_eq!(summary.page_success_rate(), 0.0);
    }
}
