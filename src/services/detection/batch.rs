// Batch Detection
// Scores many texts on the blocking pool; results keep input order.

use super::detector::AiDetector;
use crate::error::Result;
use crate::models::{BatchDetectRequest, BatchDetectResponse, BatchSummary, DetectionResult};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

pub async fn detect_batch(
    detector: Arc<AiDetector>,
    request: BatchDetectRequest,
    max_chars: usize,
) -> Result<BatchDetectResponse> {
    request.validate(max_chars)?;
    let started = Instant::now();
    let request_id = uuid::Uuid::new_v4().to_string();

    let handles: Vec<_> = request
        .texts
        .into_iter()
        .map(|text| {
            let detector = Arc::clone(&detector);
            tokio::task::spawn_blocking(move || detector.detect(&text))
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for (idx, handle) in handles.into_iter().enumerate() {
        match handle.await {
            Ok(result) => results.push(result),
            Err(e) => {
                warn!(request_id = %request_id, index = idx, error = %e, "batch.task_failed");
                results.push(DetectionResult::neutral());
            }
        }
    }

    let summary = summarize(&results);
    let processing_time_ms = started.elapsed().as_millis() as u64;
    info!(
        request_id = %request_id,
        total = summary.total,
        ai_generated = summary.ai_generated_count,
        elapsed_ms = processing_time_ms,
        "batch.completed"
    );

    Ok(BatchDetectResponse {
        request_id,
        results,
        summary,
        processing_time_ms,
    })
}

pub fn summarize(results: &[DetectionResult]) -> BatchSummary {
    let total = results.len();
    let n = total.max(1) as f64;
    BatchSummary {
        total,
        ai_generated_count: results.iter().filter(|r| r.is_ai_generated).count(),
        mean_ai_probability: results.iter().map(|r| r.ai_probability).sum::<f64>() / n,
        mean_confidence: results.iter().map(|r| r.confidence).sum::<f64>() / n,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DetectionError;
    use crate::models::DEFAULT_MAX_INPUT_CHARS;

    #[tokio::test]
    async fn test_batch_keeps_order() {
        let detector = Arc::new(AiDetector::new());
        let texts = vec![
            "Furthermore, moreover, additionally, it is important to note the comprehensive, cutting-edge, \
             state-of-the-art methodology. In conclusion, this represents a paradigm shift."
                .to_string(),
            "lol idk, kinda wanna just chill tbh :) haha that's so random".to_string(),
        ];
        let expected: Vec<_> = texts.iter().map(|t| detector.detect(t)).collect();

        let response = detect_batch(detector, BatchDetectRequest { texts }, DEFAULT_MAX_INPUT_CHARS)
            .await
            .unwrap();
        assert_eq!(response.results, expected);
        assert_eq!(response.summary.total, 2);
        assert_eq!(response.summary.ai_generated_count, 1);
        assert!(!response.request_id.is_empty());
    }

    #[tokio::test]
    async fn test_batch_rejects_single_text() {
        let detector = Arc::new(AiDetector::new());
        let request = BatchDetectRequest { texts: vec!["only one".to_string()] };
        let err = detect_batch(detector, request, DEFAULT_MAX_INPUT_CHARS).await.unwrap_err();
        assert!(matches!(err, DetectionError::BatchSize(1)));
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.mean_ai_probability, 0.0);
    }

    #[test]
    fn test_summarize_means() {
        let mut flagged = DetectionResult::neutral();
        flagged.is_ai_generated = true;
        flagged.ai_probability = 0.9;
        flagged.human_probability = 0.1;
        let summary = summarize(&[flagged, DetectionResult::neutral()]);
        assert_eq!(summary.ai_generated_count, 1);
        assert!((summary.mean_ai_probability - 0.7).abs() < 1e-9);
        assert!((summary.mean_confidence - 0.5).abs() < 1e-9);
    }
}
