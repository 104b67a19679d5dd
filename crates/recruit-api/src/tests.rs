//! Router tests against a file-backed store in a temporary directory.

use std::sync::Arc;

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
  response::Response,
};
use recruit_store_csv::CsvStore;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt as _;

use crate::{AppState, AttachmentStore, api_router};

const BOUNDARY: &str = "recruit-test-boundary";

struct Harness {
  dir:    TempDir,
  router: Router,
}

async fn harness() -> Harness {
  let dir = tempfile::tempdir().unwrap();
  let store = CsvStore::open(dir.path().join("tables")).await.unwrap();
  let attachments = AttachmentStore::open(dir.path().join("uploads")).await.unwrap();
  let router = api_router(AppState::new(Arc::new(store), attachments));
  Harness { dir, router }
}

impl Harness {
  /// Stored names in the upload directory, sorted.
  fn uploads(&self) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(self.dir.path().join("uploads"))
      .unwrap()
      .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
      .collect();
    names.sort();
    names
  }

  async fn send(&self, req: Request<Body>) -> Response {
    self.router.clone().oneshot(req).await.unwrap()
  }

  async fn get(&self, uri: &str) -> Response {
    self
      .send(Request::get(uri).body(Body::empty()).unwrap())
      .await
  }

  async fn post_json(&self, uri: &str, body: Value) -> Response {
    self
      .send(
        Request::post(uri)
          .header(header::CONTENT_TYPE, "application/json")
          .body(Body::from(body.to_string()))
          .unwrap(),
      )
      .await
  }

  async fn post_multipart(&self, uri: &str, parts: &[Part<'_>]) -> Response {
    self
      .send(
        Request::post(uri)
          .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
          )
          .body(Body::from(multipart_body(parts)))
          .unwrap(),
      )
      .await
  }
}

enum Part<'a> {
  Text(&'a str, &'a str),
  File(&'a str, &'a str, &'a str),
}

fn multipart_body(parts: &[Part<'_>]) -> String {
  let mut body = String::new();
  for part in parts {
    body.push_str(&format!("--{BOUNDARY}\r\n"));
    match part {
      Part::Text(name, value) => {
        body.push_str(&format!(
          "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
      }
      Part::File(name, file_name, content) => {
        body.push_str(&format!(
          "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
           Content-Type: application/octet-stream\r\n\r\n{content}\r\n"
        ));
      }
    }
  }
  body.push_str(&format!("--{BOUNDARY}--\r\n"));
  body
}

async fn body_json(resp: Response) -> Value {
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  serde_json::from_slice(&bytes).unwrap()
}

async fn body_text(resp: Response) -> String {
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  String::from_utf8(bytes.to_vec()).unwrap()
}

fn requisition_body() -> Value {
  json!({
    "start_date": "2024-01-01",
    "end_date": "2024-02-01",
    "manager_name": "Priya",
    "position_title": "Engineer",
    "number_of_openings": 1
  })
}

async fn add_candidate(h: &Harness, req_id: u64, name: &str) -> u64 {
  let email = format!("{name}@example.com");
  let resp = h
    .post_multipart(&format!("/requisitions/{req_id}/candidates"), &[
      Part::Text("name", name),
      Part::Text("email", &email),
    ])
    .await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  body_json(resp).await["record"]["id"].as_u64().unwrap()
}

fn screening(candidate_id: u64, status: &str) -> Value {
  json!({
    "candidate_id": candidate_id,
    "screener_name": "Sam",
    "technical_score": 7,
    "communication_score": 7,
    "experience_score": 7,
    "overall_score": 7,
    "status": status
  })
}

fn interview(candidate_id: u64, status: &str) -> Value {
  json!({
    "candidate_id": candidate_id,
    "interviewer_name": "Kim",
    "technical_score": 6,
    "problem_solving_score": 6,
    "communication_score": 6,
    "cultural_fit_score": 6,
    "overall_score": 6,
    "status": status
  })
}

// ─── Requisitions ────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_list_and_close_requisition() {
  let h = harness().await;

  let resp = h.post_json("/requisitions", requisition_body()).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let saved = body_json(resp).await;
  assert_eq!(saved["message"], "Requisition created successfully!");
  assert_eq!(saved["record"]["id"], 1);
  assert_eq!(saved["record"]["status"], "Open");

  let resp = h.post_json("/requisitions/1/close", json!({})).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(body_json(resp).await["record"]["status"], "Closed");

  let list = body_json(h.get("/requisitions").await).await;
  assert_eq!(list.as_array().unwrap().len(), 1);
  assert_eq!(list[0]["status"], "Closed");
}

#[tokio::test]
async fn invalid_requisition_is_400() {
  let h = harness().await;
  let mut body = requisition_body();
  body["number_of_openings"] = json!(0);
  let resp = h.post_json("/requisitions", body).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

  let resp = h.post_json("/requisitions", json!({ "manager_name": "x" })).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  assert!(body_json(resp).await["error"].is_string());
}

#[tokio::test]
async fn unknown_requisition_is_404_with_notice() {
  let h = harness().await;
  let resp = h.get("/requisitions/9").await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  assert_eq!(body_json(resp).await["error"], "Requisition not found!");

  let resp = h.post_json("/requisitions/9/close", json!({})).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ─── Candidates ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn candidate_with_resume() {
  let h = harness().await;
  h.post_json("/requisitions", requisition_body()).await;

  let resp = h
    .post_multipart("/requisitions/1/candidates", &[
      Part::Text("name", "Ada"),
      Part::Text("email", "ada@example.com"),
      Part::Text("notice_period", "30 days"),
      Part::File("resume", "Ada CV.pdf", "%PDF-fake"),
    ])
    .await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let cand = body_json(resp).await["record"].clone();
  assert_eq!(cand["stage"], "Applied");
  assert_eq!(cand["requisition_id"], 1);
  let stored = cand["resume_filename"].as_str().unwrap().to_owned();
  assert!(stored.ends_with("_Ada_CV.pdf"), "{stored}");

  let detail = body_json(h.get("/requisitions/1").await).await;
  assert_eq!(detail["candidates"][0]["name"], "Ada");

  let resp = h.get("/candidates/1/resume").await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(resp.headers()[header::CONTENT_TYPE], "application/pdf");
  assert_eq!(body_text(resp).await, "%PDF-fake");

  let resp = h.get(&format!("/files/{stored}")).await;
  assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn direct_hire_without_resume() {
  let h = harness().await;
  let resp = h
    .post_multipart("/candidates", &[
      Part::Text("name", "Bo"),
      Part::Text("email", "bo@example.com"),
      Part::File("resume", "", ""),
    ])
    .await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let cand = body_json(resp).await["record"].clone();
  assert_eq!(cand["requisition_id"], 0);
  assert!(cand["resume_filename"].is_null());

  let resp = h.get("/candidates/1/resume").await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  assert_eq!(body_json(resp).await["error"], "No resume found for this candidate!");
}

#[tokio::test]
async fn candidate_without_email_is_400() {
  let h = harness().await;
  let resp = h
    .post_multipart("/candidates", &[Part::Text("name", "Bo")])
    .await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  assert_eq!(h.get("/candidates/1").await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn bulk_upload_matches_resumes() {
  let h = harness().await;
  let sheet = "name,email,skills,resume_filename\n\
               Ada,ada@example.com,\"Rust, SQL\",ada.pdf\n\
               Bob,bob@example.com,Go,bob.pdf\n";
  let resp = h
    .post_multipart("/candidates/bulk-upload", &[
      Part::Text("requisition_id", "4"),
      Part::File("csv_file", "people.csv", sheet),
      Part::File("attachments", "ada.pdf", "ada resume"),
    ])
    .await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let saved = body_json(resp).await;
  assert_eq!(saved["message"], "2 candidates uploaded successfully!");

  let ada = body_json(h.get("/candidates/1").await).await;
  assert_eq!(ada["requisition_id"], 4);
  assert_eq!(ada["skills"], "Rust, SQL");
  assert!(ada["resume_filename"].as_str().unwrap().ends_with("_ada.pdf"));

  let bob = body_json(h.get("/candidates/2").await).await;
  assert!(bob["resume_filename"].is_null());
}

#[tokio::test]
async fn bulk_upload_keeps_only_referenced_files() {
  let h = harness().await;
  let sheet = "name,email,resume_filename\nAda,ada@example.com,ada.pdf\n";
  let resp = h
    .post_multipart("/candidates/bulk-upload", &[
      Part::File("csv_file", "people.csv", sheet),
      Part::File("attachments", "ada.pdf", "ada resume"),
      Part::File("attachments", "stray.pdf", "nobody's"),
    ])
    .await;
  assert_eq!(resp.status(), StatusCode::CREATED);

  let uploads = h.uploads();
  assert_eq!(uploads.len(), 1, "{uploads:?}");
  assert!(uploads[0].ends_with("_ada.pdf"));
}

#[tokio::test]
async fn failed_bulk_upload_leaves_no_files() {
  let h = harness().await;
  std::fs::write(
    h.dir.path().join("tables").join("candidates.csv"),
    "id,name\n1,\"never closed\n",
  )
  .unwrap();

  let sheet = "name,email,resume_filename\nAda,ada@example.com,ada.pdf\n";
  let resp = h
    .post_multipart("/candidates/bulk-upload", &[
      Part::File("csv_file", "people.csv", sheet),
      Part::File("attachments", "ada.pdf", "ada resume"),
    ])
    .await;
  assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
  assert_eq!(body_json(resp).await["error"], "Error uploading candidates!");
  assert!(h.uploads().is_empty());
}

#[tokio::test]
async fn bulk_upload_rejects_non_csv() {
  let h = harness().await;
  let resp = h
    .post_multipart("/candidates/bulk-upload", &[Part::File("csv_file", "people.txt", "x")])
    .await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  assert_eq!(body_json(resp).await["error"], "Please select a valid CSV file!");

  let resp = h.post_multipart("/candidates/bulk-upload", &[]).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  assert_eq!(body_json(resp).await["error"], "No file selected!");
}

// ─── Workflow ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn screening_moves_stage_and_records_history() {
  let h = harness().await;
  let id = add_candidate(&h, 1, "ada").await;

  let resp = h.post_json("/screening", screening(id, "Hold")).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let cand = body_json(h.get(&format!("/candidates/{id}")).await).await;
  assert_eq!(cand["stage"], "Screening Hold");

  h.post_json("/screening", screening(id, "Shortlisted")).await;
  let form = body_json(h.get(&format!("/screening/{id}")).await).await;
  assert_eq!(form["candidate"]["stage"], "Screening");
  assert_eq!(form["history"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn interview_outcomes_move_stage() {
  let h = harness().await;
  let id = add_candidate(&h, 1, "ada").await;
  h.post_json("/screening", screening(id, "Shortlisted")).await;

  let resp = h.post_json("/interview", interview(id, "Shortlisted")).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let cand = body_json(h.get(&format!("/candidates/{id}")).await).await;
  assert_eq!(cand["stage"], "Interview");

  h.post_json("/interview", interview(id, "Rejected")).await;
  let form = body_json(h.get(&format!("/interview/{id}")).await).await;
  assert_eq!(form["candidate"]["stage"], "Rejected");
  assert_eq!(form["history"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn screening_for_unknown_candidate_is_404() {
  let h = harness().await;
  let resp = h.post_json("/screening", screening(5, "Hold")).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  assert_eq!(body_json(resp).await["error"], "Candidate not found!");
}

#[tokio::test]
async fn offer_signed_and_letter() {
  let h = harness().await;
  let id = add_candidate(&h, 1, "ada").await;

  let resp = h.get(&format!("/offer-letter/{id}")).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  assert_eq!(body_json(resp).await["error"], "Candidate or offer not found!");

  let resp = h
    .post_json("/offer", json!({
      "candidate_id": id,
      "job_title": "Engineer",
      "salary": "90000",
      "joining_date": "2024-06-01"
    }))
    .await;
  assert_eq!(resp.status(), StatusCode::CREATED);

  let resp = h
    .post_multipart(&format!("/offer/{id}/signed"), &[Part::File(
      "signed_offer",
      "signed.pdf",
      "signed",
    )])
    .await;
  assert_eq!(resp.status(), StatusCode::OK);

  let letter = body_json(h.get(&format!("/offer-letter/{id}")).await).await;
  assert_eq!(letter["candidate"]["stage"], "Offer");
  assert_eq!(letter["offer"]["status"], "Accepted");
  assert!(
    letter["offer"]["signed_offer_filename"]
      .as_str()
      .unwrap()
      .ends_with("_signed.pdf")
  );
}

#[tokio::test]
async fn onboarding_then_resignation() {
  let h = harness().await;
  let id = add_candidate(&h, 1, "ada").await;

  let resp = h
    .post_json("/onboarding", json!({
      "candidate_id": id,
      "documents_verified": true,
      "laptop_assigned": true,
      "hr_representative": "Hana"
    }))
    .await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let snap = body_json(h.get(&format!("/onboarding/{id}")).await).await;
  assert_eq!(snap["candidate"]["stage"], "Onboarded");
  assert_eq!(snap["latest"]["laptop_assigned"], true);
  assert_eq!(snap["latest"]["id_card_issued"], false);

  let id_text = id.to_string();
  let resp = h
    .post_multipart("/resignation", &[
      Part::Text("candidate_id", &id_text),
      Part::Text("resignation_date", "2024-09-01"),
      Part::Text("last_working_date", "2024-09-30"),
      Part::Text("laptop_returned", "on"),
      Part::Text("hr_representative", "Hana"),
      Part::File("resignation_letter", "letter.txt", "I quit"),
    ])
    .await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let rec = body_json(resp).await["record"].clone();
  assert_eq!(rec["final_settlement"], "Pending");
  assert_eq!(rec["completion_status"], "In Progress");
  assert!(rec["documents"]["resignation_letter"].is_string());
  assert!(rec["documents"]["relieving_letter"].is_null());

  let form = body_json(h.get(&format!("/resignation/{id}")).await).await;
  assert_eq!(form["candidate"]["stage"], "Resigned");
}

#[tokio::test]
async fn last_day_before_resignation_is_400() {
  let h = harness().await;
  let id = add_candidate(&h, 1, "ada").await;
  let id_text = id.to_string();
  let resp = h
    .post_multipart("/resignation", &[
      Part::Text("candidate_id", &id_text),
      Part::Text("resignation_date", "2024-09-01"),
      Part::Text("last_working_date", "2024-08-01"),
      Part::Text("hr_representative", "Hana"),
    ])
    .await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// ─── Files ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn download_table() {
  let h = harness().await;
  add_candidate(&h, 1, "ada").await;

  let resp = h.get("/download/candidates").await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert!(
    resp.headers()[header::CONTENT_DISPOSITION]
      .to_str()
      .unwrap()
      .contains("candidates.csv")
  );
  let text = body_text(resp).await;
  assert!(text.starts_with("id,requisition_id,name,"), "{text}");
  assert!(text.contains("ada@example.com"));

  let resp = h.get("/download/offers.csv").await;
  assert_eq!(resp.status(), StatusCode::OK);

  let resp = h.get("/download/passwords").await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  assert_eq!(body_json(resp).await["error"], "Invalid CSV file!");
}

#[tokio::test]
async fn missing_file_is_404() {
  let h = harness().await;
  let resp = h.get("/files/nothing.pdf").await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  assert_eq!(body_json(resp).await["error"], "File not found!");
}
