//! Every façade method hits exactly one endpoint with the expected method,
//! path, query and body.

use std::rc::Rc;

use futures::executor::block_on;
use serde_json::{json, Value};

use super::mock_transport::MockTransport;
use crate::api::visualization::ChartSeries;
use crate::api::{Api, PipelineClient};
use crate::error::ApiError;
use crate::models::*;
use crate::network::{ApiClient, ApiConfig, HttpMethod};

const BASE: &str = "http://backend.test";

fn primary(mock: &Rc<MockTransport>) -> Api {
    Api::new(ApiClient::new(ApiConfig::from_url(BASE), mock.clone()))
}

fn pipeline(mock: &Rc<MockTransport>) -> PipelineClient {
    PipelineClient::new(ApiClient::new(ApiConfig::from_url("http://pipeline.test"), mock.clone()))
}

fn ok(mock: &Rc<MockTransport>) {
    mock.respond_json(200, json!({"success": true, "data": null}));
}

fn assert_single_call(mock: &MockTransport, method: HttpMethod, url: &str) {
    assert_eq!(mock.calls(), vec![(method, url.to_string())]);
}

fn sent_body(mock: &MockTransport) -> Value {
    let body = mock.last_request().and_then(|r| r.body).expect("request body");
    serde_json::from_str(&body).unwrap()
}

#[test]
fn topic_endpoints() {
    let mock = MockTransport::new();
    let api = primary(&mock);

    mock.respond_json(200, json!({"success": true, "data": [{"id": 3, "topic_name": "x"}]}));
    let listed = block_on(api.topics.list()).unwrap();
    assert_eq!(listed.data.map(|t| t.len()), Some(1));

    mock.respond_json(200, json!({"success": true}));
    block_on(api.topics.delete(TopicId(3))).unwrap();

    assert_eq!(
        mock.calls(),
        vec![
            (HttpMethod::Get, format!("{}/api/manage/topics", BASE)),
            (HttpMethod::Delete, format!("{}/api/manage/topics/3", BASE)),
        ]
    );
}

#[test]
fn crawler_endpoints() {
    let mock = MockTransport::new();
    let api = primary(&mock);
    for _ in 0..3 {
        ok(&mock);
    }

    let start = CrawlerStartRequest { keyword: Some("春节".to_string()), ..Default::default() };
    block_on(api.crawler.start(&start)).unwrap();
    assert_eq!(sent_body(&mock), json!({"keyword": "春节"}));
    block_on(api.crawler.stop()).unwrap();
    assert_eq!(mock.last_request().unwrap().body, None);
    block_on(api.crawler.status()).unwrap();

    assert_eq!(
        mock.calls(),
        vec![
            (HttpMethod::Post, format!("{}/api/crawler/start", BASE)),
            (HttpMethod::Post, format!("{}/api/crawler/stop", BASE)),
            (HttpMethod::Get, format!("{}/api/crawler/status", BASE)),
        ]
    );
}

#[test]
fn sentiment_results_forward_query() {
    let mock = MockTransport::new();
    ok(&mock);
    let api = primary(&mock);

    let query = ResultsQuery {
        topic_id: Some(TopicId(5)),
        start_date: Some("2024-02-01".to_string()),
        ..Default::default()
    };
    block_on(api.sentiment.results(&query)).unwrap();

    assert_single_call(
        &mock,
        HttpMethod::Get,
        &format!("{}/api/sentiment/results?start_date=2024-02-01&topic_id=5", BASE),
    );
}

#[test]
fn sentiment_analyze_and_predict() {
    let mock = MockTransport::new();
    ok(&mock);
    ok(&mock);
    let api = primary(&mock);

    block_on(api.sentiment.analyze(&AnalyzeRequest { topic_id: TopicId(5) })).unwrap();
    assert_eq!(sent_body(&mock), json!({"topic_id": 5}));
    block_on(api.sentiment.predict("今天很开心")).unwrap();
    assert_eq!(sent_body(&mock), json!({"text": "今天很开心"}));

    let urls: Vec<String> = mock.calls().into_iter().map(|(_, url)| url).collect();
    assert_eq!(
        urls,
        vec![
            format!("{}/api/sentiment/analyze", BASE),
            format!("{}/api/sentiment/predict", BASE),
        ]
    );
}

#[test]
fn keyword_endpoints() {
    let mock = MockTransport::new();
    ok(&mock);
    ok(&mock);
    let api = primary(&mock);

    block_on(api.keyword.extract(&KeywordExtractRequest::new(TopicId(9)))).unwrap();
    assert_eq!(sent_body(&mock), json!({"topic_id": 9, "top_n": 50}));
    block_on(api.keyword.results(&ResultsQuery::default())).unwrap();

    assert_eq!(
        mock.calls(),
        vec![
            (HttpMethod::Post, format!("{}/api/keyword/extract", BASE)),
            (HttpMethod::Get, format!("{}/api/keyword/results", BASE)),
        ]
    );
}

#[test]
fn visualization_series_paths() {
    let mock = MockTransport::new();
    let api = primary(&mock);
    let query = VisualizationQuery { topic_id: Some(TopicId(2)), period: Some(TrendPeriod::Week) };

    for series in [ChartSeries::Trend, ChartSeries::Sentiment, ChartSeries::Keyword, ChartSeries::Geographic] {
        ok(&mock);
        block_on(api.visualization.series(series, &query)).unwrap();
    }

    let urls: Vec<String> = mock.calls().into_iter().map(|(_, url)| url).collect();
    assert_eq!(
        urls,
        ["trend", "sentiment", "keyword", "geographic"]
            .iter()
            .map(|s| format!("{}/api/visualization/{}?period=week&topic_id=2", BASE, s))
            .collect::<Vec<_>>()
    );
}

#[test]
fn ai_endpoints() {
    let mock = MockTransport::new();
    for _ in 0..3 {
        ok(&mock);
    }
    let api = primary(&mock);

    block_on(api.ai.generate_report(&ReportRequest { topic_id: TopicId(1) })).unwrap();
    block_on(api.ai.detect_anomaly(&AnomalyRequest { topic_id: TopicId(1) })).unwrap();
    block_on(api.ai.chat(&ChatRequest { question: "舆情如何?".to_string(), topic_id: None })).unwrap();
    assert_eq!(sent_body(&mock), json!({"question": "舆情如何?"}));

    let calls = mock.calls();
    assert!(calls.iter().all(|(m, _)| *m == HttpMethod::Post));
    assert_eq!(calls[0].1, format!("{}/api/ai/generate-report", BASE));
    assert_eq!(calls[1].1, format!("{}/api/ai/detect-anomaly", BASE));
    assert_eq!(calls[2].1, format!("{}/api/ai/chat", BASE));
}

#[test]
fn data_export_and_query() {
    let mock = MockTransport::new();
    ok(&mock);
    ok(&mock);
    let api = primary(&mock);

    block_on(api.data.export(&ExportQuery { topic_id: Some(TopicId(3)), format: ExportFormat::Json })).unwrap();
    block_on(api.data.query(&DataQuery { keyword: Some("热搜".to_string()), ..Default::default() })).unwrap();

    assert_eq!(
        mock.calls(),
        vec![
            (HttpMethod::Get, format!("{}/api/manage/data/export?format=json&topic_id=3", BASE)),
            (HttpMethod::Get, format!("{}/api/manage/data/query?keyword=%E7%83%AD%E6%90%9C", BASE)),
        ]
    );
}

#[test]
fn pipeline_client_uses_its_own_base_and_raw_bodies() {
    let mock = MockTransport::new();
    mock.respond_json(200, json!({"status": "success", "results": {"topics_added": 5}}));
    let client = pipeline(&mock);

    let reply = block_on(client.run(&PipelineRunRequest::hot_topics(5))).unwrap();

    assert_eq!(reply["results"]["topics_added"], json!(5));
    assert_single_call(&mock, HttpMethod::Post, "http://pipeline.test/api/pipeline/run");
    assert_eq!(sent_body(&mock), json!({"mode": "hot_topics", "limit": 5}));
}

#[test]
fn pipeline_client_endpoint_table() {
    let mock = MockTransport::new();
    for _ in 0..9 {
        mock.respond_json(200, json!({"status": "success"}));
    }
    let client = pipeline(&mock);

    block_on(client.crawl_hot_topics(&HotTopicsRequest::default())).unwrap();
    assert_eq!(sent_body(&mock), json!({"limit": 10, "filter_sensitive": true}));
    block_on(client.search_topic("春节")).unwrap();
    assert_eq!(sent_body(&mock), json!({"keyword": "春节"}));
    block_on(client.sync_data()).unwrap();
    block_on(client.crawler_status()).unwrap();
    block_on(client.process(TopicId(12))).unwrap();
    block_on(client.pipeline_status()).unwrap();
    block_on(client.visualization_topics()).unwrap();
    block_on(client.topic_keywords(TopicId(12))).unwrap();
    block_on(client.topic_sentiments(TopicId(12))).unwrap();

    let expected = vec![
        (HttpMethod::Post, "/api/crawler/hot-topics"),
        (HttpMethod::Post, "/api/crawler/search"),
        (HttpMethod::Post, "/api/crawler/sync"),
        (HttpMethod::Get, "/api/crawler/status"),
        (HttpMethod::Post, "/api/pipeline/process/12"),
        (HttpMethod::Get, "/api/pipeline/status"),
        (HttpMethod::Get, "/api/visualization/topics"),
        (HttpMethod::Get, "/api/visualization/topics/12/keywords"),
        (HttpMethod::Get, "/api/visualization/topics/12/sentiments"),
    ];
    let expected: Vec<(HttpMethod, String)> = expected
        .into_iter()
        .map(|(m, p)| (m, format!("http://pipeline.test{}", p)))
        .collect();
    assert_eq!(mock.calls(), expected);
}

#[test]
fn facade_errors_propagate_unchanged() {
    let mock = MockTransport::new();
    mock.respond_json(400, json!({"status": "error", "message": "search模式需要提供keyword参数"}));
    let client = pipeline(&mock);

    let err = block_on(client.run(&PipelineRunRequest {
        mode: PipelineMode::Search,
        keyword: None,
        limit: 10,
        steps: Some(PipelineSteps::default()),
    }))
    .unwrap_err();

    assert_eq!(
        err,
        ApiError::Status { status: 400, message: "search模式需要提供keyword参数".to_string() }
    );
    assert_eq!(mock.request_count(), 1);
}
