//! Integration tests for `CsvStore` against a temporary directory.

use std::{collections::HashMap, sync::Arc};

use chrono::NaiveDate;
use recruit_core::{
  Recruiter, Row, Table,
  event::{NewInterview, NewScreening},
  import::candidates_from_rows,
  record::{NewCandidate, NewRequisition, RequisitionStatus},
  row::MAX_ID,
  stage::{Outcome, Stage},
  store::TableStore,
};
use tempfile::TempDir;

use crate::{CsvStore, Error};

async fn store() -> (TempDir, CsvStore) {
  let dir = tempfile::tempdir().expect("temp dir");
  let store = CsvStore::open(dir.path()).await.expect("open store");
  (dir, store)
}

fn date(s: &str) -> NaiveDate { s.parse().unwrap() }

fn requisition() -> NewRequisition {
  NewRequisition {
    start_date:         date("2024-01-01"),
    end_date:           date("2024-03-31"),
    manager_name:       "Priya".into(),
    position_title:     "Backend Engineer".into(),
    job_description:    "Build services".into(),
    number_of_openings: 2,
    department:         "Engineering".into(),
    location:           "Remote".into(),
    requirements:       "Rust".into(),
  }
}

fn applicant(name: &str) -> NewCandidate {
  NewCandidate {
    name: name.into(),
    email: format!("{}@example.com", name.to_lowercase()),
    ..Default::default()
  }
}

// ─── Raw table contract ──────────────────────────────────────────────────────

#[tokio::test]
async fn missing_table_reads_empty_and_ids_start_at_one() {
  let (_dir, s) = store().await;
  assert!(s.read(Table::Offers).await.unwrap().is_empty());
  assert_eq!(s.next_id(Table::Offers).await.unwrap(), 1);
}

#[tokio::test]
async fn empty_table_also_starts_at_one() {
  let (_dir, s) = store().await;
  s.write(Table::Offers, Vec::new()).await.unwrap();
  assert!(s.path(Table::Offers).exists());
  assert_eq!(s.next_id(Table::Offers).await.unwrap(), 1);
}

#[tokio::test]
async fn next_id_after_append() {
  let (_dir, s) = store().await;
  s.append(Table::Candidates, Row::new().with("id", "4").with("name", "A"))
    .await
    .unwrap();
  s.append(Table::Candidates, Row::new().with("id", "2").with("name", "B"))
    .await
    .unwrap();
  assert_eq!(s.next_id(Table::Candidates).await.unwrap(), 5);
}

#[tokio::test]
async fn write_read_round_trip_with_unicode() {
  let (_dir, s) = store().await;
  let rows = vec![
    Row::new()
      .with("id", "1")
      .with("name", "Zoë Ñúñez, 李雷")
      .with("skills", "C++; \"Rust\"\nGo"),
    Row::new().with("id", "2").with("name", "Ola").with("skills", ""),
  ];
  s.write(Table::Candidates, rows.clone()).await.unwrap();

  let back = s.read(Table::Candidates).await.unwrap();
  assert_eq!(back.len(), 2);
  assert_eq!(back[0].get("name"), rows[0].get("name"));
  assert_eq!(back[0].get("skills"), rows[0].get("skills"));
  assert_eq!(back[1].get("name"), Some("Ola"));
}

#[tokio::test]
async fn file_uses_canonical_header_order() {
  let (_dir, s) = store().await;
  s.append(
    Table::Requisitions,
    Row::new().with("status", "Open").with("id", "1").with("manager_name", "M"),
  )
  .await
  .unwrap();
  let text = std::fs::read_to_string(s.path(Table::Requisitions)).unwrap();
  assert!(text.starts_with("id,manager_name,status\n"), "{text}");
}

#[tokio::test]
async fn update_field_touches_only_the_target() {
  let (_dir, s) = store().await;
  for (id, name) in [(1, "A"), (2, "B"), (3, "C")] {
    s.append(
      Table::Candidates,
      Row::new()
        .with("id", id.to_string())
        .with("name", name)
        .with("stage", "Applied"),
    )
    .await
    .unwrap();
  }

  let matched = s
    .update_field(Table::Candidates, 2, "stage", "Interview".into())
    .await
    .unwrap();
  assert_eq!(matched, 1);

  let rows = s.read(Table::Candidates).await.unwrap();
  let stages: Vec<_> = rows.iter().map(|r| r.get("stage").unwrap()).collect();
  assert_eq!(stages, ["Applied", "Interview", "Applied"]);
  assert_eq!(rows[1].get("name"), Some("B"));
}

#[tokio::test]
async fn update_field_with_no_match() {
  let (_dir, s) = store().await;
  s.append(Table::Candidates, Row::new().with("id", "1")).await.unwrap();
  let matched = s
    .update_field(Table::Candidates, 9, "stage", "Offer".into())
    .await
    .unwrap();
  assert_eq!(matched, 0);
}

#[tokio::test]
async fn update_fields_writes_every_field() {
  let (_dir, s) = store().await;
  s.insert(Table::Offers, Row::new().with("status", "Sent")).await.unwrap();
  let matched = s
    .update_fields(Table::Offers, 1, vec![
      ("signed_offer_filename", "x_signed.pdf".into()),
      ("status", "Accepted".into()),
    ])
    .await
    .unwrap();
  assert_eq!(matched, 1);

  let rows = s.read(Table::Offers).await.unwrap();
  assert_eq!(rows[0].get("status"), Some("Accepted"));
  assert_eq!(rows[0].get("signed_offer_filename"), Some("x_signed.pdf"));
}

#[tokio::test]
async fn exhausted_ids_are_an_error() {
  let (_dir, s) = store().await;
  let full = vec![Row::new().with("id", u64::MAX.to_string())];
  s.write(Table::Offers, full.clone()).await.unwrap();

  assert!(matches!(
    s.insert(Table::Offers, Row::new()).await,
    Err(Error::IdsExhausted { table: Table::Offers })
  ));
  assert!(s.next_id(Table::Offers).await.is_err());
  assert!(s.insert_all(Table::Offers, vec![Row::new()]).await.is_err());
  assert_eq!(s.read(Table::Offers).await.unwrap(), full);
}

#[tokio::test]
async fn id_block_past_the_ceiling_writes_nothing() {
  let (_dir, s) = store().await;
  s.write(Table::Offers, vec![Row::new().with("id", (MAX_ID - 1).to_string())])
    .await
    .unwrap();

  assert!(s.insert_all(Table::Offers, vec![Row::new(), Row::new()]).await.is_err());
  assert_eq!(s.read(Table::Offers).await.unwrap().len(), 1);
  assert_eq!(s.insert(Table::Offers, Row::new()).await.unwrap(), MAX_ID);
}

#[tokio::test]
async fn single_column_blank_value_survives() {
  let (_dir, s) = store().await;
  let rows = vec![Row::new().with("id", "1"), Row::new().with("id", "")];
  s.write(Table::Offers, rows.clone()).await.unwrap();
  assert_eq!(s.read(Table::Offers).await.unwrap(), rows);
}

#[tokio::test]
async fn malformed_file_is_an_error_and_is_not_clobbered() {
  let (_dir, s) = store().await;
  let path = s.path(Table::Screening);
  std::fs::write(&path, "id,comments\n1,\"never closed\n").unwrap();

  assert!(s.read(Table::Screening).await.is_err());
  assert!(s.insert(Table::Screening, Row::new()).await.is_err());
  let text = std::fs::read_to_string(&path).unwrap();
  assert!(text.contains("never closed"));
}

#[tokio::test]
async fn init_tables_leaves_existing_files_alone() {
  let (_dir, s) = store().await;
  s.insert(Table::Requisitions, Row::new().with("manager_name", "M"))
    .await
    .unwrap();

  let created = s.init_tables().await.unwrap();
  assert_eq!(created.len(), Table::ALL.len() - 1);
  assert!(!created.contains(&Table::Requisitions));
  assert_eq!(s.read(Table::Requisitions).await.unwrap().len(), 1);

  let header = std::fs::read_to_string(s.path(Table::Onboarding)).unwrap();
  assert_eq!(header.trim_end(), Table::Onboarding.columns().join(","));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_inserts_get_distinct_ids() {
  let (_dir, s) = store().await;
  let s = Arc::new(s);

  let handles: Vec<_> = (0..20)
    .map(|i| {
      let s = Arc::clone(&s);
      tokio::spawn(async move {
        s.insert(Table::Candidates, Row::new().with("name", format!("c{i}")))
          .await
          .unwrap()
      })
    })
    .collect();

  let mut ids = Vec::new();
  for h in handles {
    ids.push(h.await.unwrap());
  }
  ids.sort_unstable();
  assert_eq!(ids, (1..=20).collect::<Vec<u64>>());
  assert_eq!(s.read(Table::Candidates).await.unwrap().len(), 20);
}

// ─── Workflow scenarios ──────────────────────────────────────────────────────

async fn recruiter() -> (TempDir, Recruiter<CsvStore>) {
  let (dir, s) = store().await;
  (dir, Recruiter::new(Arc::new(s)))
}

#[tokio::test]
async fn close_requisition_is_idempotent() {
  let (_dir, r) = recruiter().await;
  let req = r.create_requisition(requisition()).await.unwrap();
  assert_eq!(req.id, 1);
  assert_eq!(req.status, RequisitionStatus::Open);

  r.close_requisition(req.id).await.unwrap();
  r.close_requisition(req.id).await.unwrap();

  let all = r.requisitions().await;
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].status, RequisitionStatus::Closed);
  assert_eq!(all[0].position_title, "Backend Engineer");
}

#[tokio::test]
async fn close_unknown_requisition() {
  let (_dir, r) = recruiter().await;
  assert!(r.close_requisition(7).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn screening_then_interview_rejection() {
  let (_dir, r) = recruiter().await;
  let req = r.create_requisition(requisition()).await.unwrap();
  let cand = r.add_candidate(req.id, applicant("Ada"), None).await.unwrap();
  assert_eq!(cand.stage, Stage::Applied);

  r.submit_screening(NewScreening {
    candidate_id:        cand.id,
    screener_name:       "Sam".into(),
    technical_score:     8,
    communication_score: 7,
    experience_score:    6,
    overall_score:       7,
    comments:            "solid".into(),
    status:              Outcome::Shortlisted,
  })
  .await
  .unwrap();
  assert_eq!(r.candidate(cand.id).await.unwrap().stage, Stage::Screening);

  r.submit_interview(NewInterview {
    candidate_id:          cand.id,
    interviewer_name:      "Kim".into(),
    interview_type:        "Technical".into(),
    technical_score:       3,
    problem_solving_score: 4,
    communication_score:   5,
    cultural_fit_score:    5,
    overall_score:         4,
    comments:              String::new(),
    status:                Outcome::Rejected,
  })
  .await
  .unwrap();

  let cand = r.candidate(cand.id).await.unwrap();
  assert_eq!(cand.stage, Stage::Rejected);

  let form = r.screening_form(cand.id).await.unwrap();
  assert_eq!(form.history.len(), 1);
  assert_eq!(form.history[0].screener_name, "Sam");
  assert_eq!(r.interview_form(cand.id).await.unwrap().history.len(), 1);
}

#[tokio::test]
async fn screening_for_unknown_candidate() {
  let (_dir, r) = recruiter().await;
  let err = r
    .submit_screening(NewScreening {
      candidate_id:        42,
      screener_name:       "Sam".into(),
      technical_score:     1,
      communication_score: 1,
      experience_score:    1,
      overall_score:       1,
      comments:            String::new(),
      status:              Outcome::Hold,
    })
    .await
    .unwrap_err();
  assert!(err.is_not_found());
  assert!(r.store().read(Table::Screening).await.unwrap().is_empty());
}

#[tokio::test]
async fn bulk_import_with_unmatched_resume() {
  let (_dir, r) = recruiter().await;
  r.add_direct_hire(applicant("Existing"), None).await.unwrap();

  let sheet = recruit_csv::parse(
    "name,email,resume_filename\n\
     Ada,ada@example.com,ada.pdf\n\
     Bob,bob@example.com,missing.pdf\n",
  )
  .unwrap();
  let imported = candidates_from_rows(&sheet, Some(3)).unwrap();
  let resumes = HashMap::from([("ada.pdf".to_string(), "u1_ada.pdf".to_string())]);

  let created = r.import_candidates(imported, &resumes).await.unwrap();
  let ids: Vec<_> = created.iter().map(|c| c.id).collect();
  assert_eq!(ids, [2, 3]);

  let ada = r.candidate(2).await.unwrap();
  assert_eq!(ada.requisition_id, 3);
  assert_eq!(ada.resume_filename.as_deref(), Some("u1_ada.pdf"));
  assert_eq!(ada.stage, Stage::Applied);

  let bob = r.candidate(3).await.unwrap();
  assert_eq!(bob.resume_filename, None);
  assert_eq!(r.candidates_for(3).await.len(), 2);
}

#[tokio::test]
async fn undecodable_rows_are_skipped() {
  let (_dir, r) = recruiter().await;
  r.add_direct_hire(applicant("Good"), None).await.unwrap();
  r.store()
    .append(Table::Candidates, Row::new().with("id", "x").with("name", "Bad"))
    .await
    .unwrap();

  let listed = r.candidates_for(0).await;
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0].name, "Good");
}
