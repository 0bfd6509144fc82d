use extract::{Extraction, TitleMethod};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

#[derive(Default)]
pub struct Metrics {
    // Counters
    extract_requests: AtomicUsize,
    names_found: AtomicUsize,
    titles_not_found: AtomicUsize,
    annotation_failures: AtomicUsize,
    cache_served: AtomicUsize,

    // Title strategy hits
    noun_chunk_before: AtomicUsize,
    dependency_subtree: AtomicUsize,
    noun_chunk_search: AtomicUsize,

    // Submissions
    submissions_accepted: AtomicUsize,
    submissions_rejected: AtomicUsize,

    // Timing (in microseconds)
    total_extract_time_us: AtomicU64,
    timed_extractions: AtomicUsize,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_extraction(&self, extraction: &Extraction, duration: Duration) {
        self.extract_requests.fetch_add(1, Ordering::Relaxed);
        self.total_extract_time_us
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
        self.timed_extractions.fetch_add(1, Ordering::Relaxed);
        self.count_outcome(extraction);
    }

    pub fn record_cached(&self, extraction: &Extraction) {
        self.extract_requests.fetch_add(1, Ordering::Relaxed);
        self.cache_served.fetch_add(1, Ordering::Relaxed);
        self.count_outcome(extraction);
    }

    pub fn record_annotation_failure(&self) {
        self.extract_requests.fetch_add(1, Ordering::Relaxed);
        self.annotation_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_submission(&self, accepted: bool) {
        if accepted {
            self.submissions_accepted.fetch_add(1, Ordering::Relaxed);
        } else {
            self.submissions_rejected.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn count_outcome(&self, extraction: &Extraction) {
        if extraction.name.is_none() {
            return;
        }
        self.names_found.fetch_add(1, Ordering::Relaxed);

        let counter = match extraction.method {
            Some(TitleMethod::NounChunkBefore) => &self.noun_chunk_before,
            Some(TitleMethod::DependencySubtree) => &self.dependency_subtree,
            Some(TitleMethod::NounChunkSearch) => &self.noun_chunk_search,
            None => &self.titles_not_found,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            extract_requests: self.extract_requests.load(Ordering::Relaxed),
            names_found: self.names_found.load(Ordering::Relaxed),
            titles_not_found: self.titles_not_found.load(Ordering::Relaxed),
            annotation_failures: self.annotation_failures.load(Ordering::Relaxed),
            cache_served: self.cache_served.load(Ordering::Relaxed),
            title_methods: MethodCounts {
                noun_chunk_before: self.noun_chunk_before.load(Ordering::Relaxed),
                dependency_subtree: self.dependency_subtree.load(Ordering::Relaxed),
                noun_chunk_search: self.noun_chunk_search.load(Ordering::Relaxed),
            },
            submissions_accepted: self.submissions_accepted.load(Ordering::Relaxed),
            submissions_rejected: self.submissions_rejected.load(Ordering::Relaxed),
            avg_extract_time_ms: self.avg_time_ms(&self.total_extract_time_us, &self.timed_extractions),
        }
    }

    fn avg_time_ms(&self, total_us: &AtomicU64, count: &AtomicUsize) -> f64 {
        let total = total_us.load(Ordering::Relaxed) as f64;
        let cnt = count.load(Ordering::Relaxed) as f64;
        if cnt > 0.0 {
            total / cnt / 1000.0 // Convert to ms
        } else {
            0.0
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MethodCounts {
    pub noun_chunk_before: usize,
    pub dependency_subtree: usize,
    pub noun_chunk_search: usize,
}

#[derive(Debug, Serialize)]
pub struct MetricsSnapshot {
    pub extract_requests: usize,
    pub names_found: usize,
    pub titles_not_found: usize,
    pub annotation_failures: usize,
    pub cache_served: usize,
    pub title_methods: MethodCounts,
    pub submissions_accepted: usize,
    pub submissions_rejected: usize,
    pub avg_extract_time_ms: f64,
}

pub struct TimedOperation {
    start: Instant,
}

impl TimedOperation {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
