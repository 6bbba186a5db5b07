use labroster_core::{
  gender::Gender,
  label::{Locale, MessageCatalog},
  status::MemberStatus,
};

use super::*;

fn bundled() -> Catalog { Catalog::bundled().unwrap() }

// ── Loading ──────────────────────────────────────────────────────────────

#[test]
fn nested_tables_flatten_to_dotted_keys() {
  let c = Catalog::from_toml_str(
    "en",
    r#"
      top = "Top"
      [memberStatus]
      PHD_STUDENT = "PhD Student"
      [memberStatus.extra]
      deep = "Deep"
    "#,
  )
  .unwrap();
  let en = Locale::new("en");
  assert_eq!(c.get("top", &en), Some("Top"));
  assert_eq!(c.get("memberStatus.PHD_STUDENT", &en), Some("PhD Student"));
  assert_eq!(c.get("memberStatus.extra.deep", &en), Some("Deep"));
}

#[test]
fn non_string_values_are_rejected() {
  let r = Catalog::from_toml_str("en", "[memberStatus]\nPOSTDOC = 3\n");
  assert!(matches!(
    r,
    Err(Error::NonStringValue { key }) if key == "memberStatus.POSTDOC"
  ));
}

#[test]
fn malformed_toml_is_rejected() {
  let r = Catalog::from_toml_str("en", "[memberStatus\n");
  assert!(matches!(r, Err(Error::Toml(_))));
}

#[test]
fn missing_file_reports_path() {
  let mut c = Catalog::new();
  let r = c.load_file(Path::new("/nonexistent/labroster/fr.toml"));
  assert!(matches!(r, Err(Error::Io { path, .. }) if path.ends_with("fr.toml")));
}

#[test]
fn root_table_is_locale_independent() {
  let c = Catalog::from_toml_str(
    "fr",
    r#"
      [root.memberStatus]
      PHD_STUDENT_acronym = "DOC"
      [memberStatus]
      PHD_STUDENT = "Doctorant"
    "#,
  )
  .unwrap();
  assert_eq!(
    c.get("memberStatus.PHD_STUDENT_acronym", &Locale::root()),
    Some("DOC")
  );
  assert_eq!(c.get("memberStatus.PHD_STUDENT", &Locale::root()), None);
  assert_eq!(
    MemberStatus::PhdStudent.french_acronym_in(&c),
    "DOC".to_string()
  );
  assert_eq!(MemberStatus::Postdoc.french_acronym_in(&c), "POSTDOC");
}

// ── Lookup ───────────────────────────────────────────────────────────────

#[test]
fn region_falls_back_to_language() {
  let mut c = Catalog::new();
  c.insert("fr", "k", "général");
  c.insert("fr-CA", "k", "canadien");
  c.insert("fr", "only_fr", "fr");
  assert_eq!(c.get("k", &Locale::new("fr_CA")), Some("canadien"));
  assert_eq!(c.get("k", &Locale::new("fr-FR")), Some("général"));
  assert_eq!(c.get("only_fr", &Locale::new("fr-CA")), Some("fr"));
  assert_eq!(c.get("k", &Locale::new("de")), None);
}

#[test]
fn root_entries_back_every_locale() {
  let mut c = Catalog::new();
  c.insert("*", "k", "root");
  c.insert("en", "k", "english");
  assert_eq!(c.get("k", &Locale::new("en")), Some("english"));
  assert_eq!(c.get("k", &Locale::new("de")), Some("root"));
  assert_eq!(c.get("k", &Locale::root()), Some("root"));
}

#[test]
fn merge_prefers_incoming_entries() {
  let mut base = Catalog::new();
  base.insert("en", "a", "old");
  base.insert("en", "b", "kept");
  let mut update = Catalog::new();
  update.insert("en", "a", "new");
  base.merge(update);
  let en = Locale::new("en");
  assert_eq!(base.get("a", &en), Some("new"));
  assert_eq!(base.get("b", &en), Some("kept"));
}

// ── Bundled labels ───────────────────────────────────────────────────────

#[test]
fn bundled_catalog_has_both_locales() {
  let c = bundled();
  let mut locales: Vec<_> = c.locales().collect();
  locales.sort_unstable();
  assert_eq!(locales, ["en", "fr"]);
}

#[test]
fn every_status_has_english_and_french_labels() {
  let c = bundled();
  for locale in [Locale::new("en"), Locale::new("fr")] {
    for status in MemberStatus::all() {
      for former in [false, true] {
        let label = status.label(&c, None, former, &locale);
        assert_ne!(label, status.name(), "{status} in {locale}");
        assert!(!label.trim().is_empty());
      }
    }
  }
}

const ENGLISH_LABELS: [(MemberStatus, &str); 26] = [
  (MemberStatus::EmeritusFullProfessor, "Emeritus Professor"),
  (MemberStatus::FullProfessor, "Full Professor"),
  (MemberStatus::ResearchDirector, "Research Director"),
  (
    MemberStatus::EmeritusAssociateProfessorHdr,
    "Emeritus Associate Professor HDR",
  ),
  (
    MemberStatus::EmeritusAssociateProfessor,
    "Emeritus Associate Professor",
  ),
  (MemberStatus::AssociateProfessorHdr, "Associate Professor HDR"),
  (MemberStatus::AssociateProfessor, "Associate Professor"),
  (
    MemberStatus::ContractualResearcherTeacherPhd,
    "Contractual Teacher Researcher",
  ),
  (
    MemberStatus::ContractualResearcherTeacher,
    "Contractual Teacher Researcher",
  ),
  (MemberStatus::ResearcherPhd, "Researcher"),
  (MemberStatus::Researcher, "Researcher"),
  (MemberStatus::Postdoc, "Postdoc"),
  (MemberStatus::ResearchEngineerPhd, "Research Engineer"),
  (MemberStatus::ResearchEngineer, "Research Engineer"),
  (MemberStatus::PhdStudent, "PhD Student"),
  (MemberStatus::EngineerPhd, "Engineer"),
  (MemberStatus::Engineer, "Engineer"),
  (MemberStatus::Admin, "Administrative Staff"),
  (MemberStatus::TeacherPhd, "Teacher"),
  (MemberStatus::Teacher, "Teacher"),
  (MemberStatus::MasterStudent, "Master Student"),
  (MemberStatus::ContractMasterStudent, "Contractual Master Student"),
  (MemberStatus::OtherContractStudent, "Contractual Student"),
  (MemberStatus::OtherStudent, "Student"),
  (MemberStatus::AssociatedMemberPhd, "Associated Member"),
  (MemberStatus::AssociatedMember, "Associated Member"),
];

#[test]
fn english_labels_for_every_status() {
  let c = bundled();
  let en = Locale::new("en-US");
  let covered: Vec<_> = ENGLISH_LABELS.iter().map(|(s, _)| *s).collect();
  assert_eq!(covered, MemberStatus::all().collect::<Vec<_>>());

  let genders = [
    None,
    Some(Gender::NotSpecified),
    Some(Gender::Male),
    Some(Gender::Female),
    Some(Gender::Other),
  ];
  for (status, label) in ENGLISH_LABELS {
    for gender in genders {
      assert_eq!(status.label(&c, gender, false, &en), label, "{status}");
      assert_eq!(
        status.label(&c, gender, true, &en),
        format!("Former {label}"),
        "{status}"
      );
    }
  }
}

#[test]
fn french_labels_agree_in_gender() {
  let c = bundled();
  let fr = Locale::new("fr-FR");
  let s = MemberStatus::PhdStudent;
  assert_eq!(s.label_for(&c, Some(Gender::Female), &fr), "Doctorante");
  assert_eq!(s.label_for(&c, Some(Gender::Male), &fr), "Doctorant");
  assert_eq!(s.label_for(&c, Some(Gender::Other), &fr), "Doctorant");
  assert_eq!(
    s.label(&c, Some(Gender::Female), true, &fr),
    "Ancienne doctorante"
  );
  assert_eq!(s.label(&c, None, true, &fr), "Ancien doctorant");
}

#[test]
fn civil_titles() {
  let c = bundled();
  assert_eq!(
    MemberStatus::FullProfessor.civil_title(&c, &Locale::new("fr")),
    Some("Pr.".to_string())
  );
  assert_eq!(
    MemberStatus::FullProfessor.civil_title(&c, &Locale::new("en")),
    Some("Prof.".to_string())
  );
  assert_eq!(
    MemberStatus::PhdStudent.civil_title(&c, &Locale::new("en")),
    None
  );
}

#[test]
fn catalog_is_a_message_catalog() {
  let c = bundled();
  let dyn_catalog: &dyn MessageCatalog = &c;
  assert_eq!(
    dyn_catalog.message("memberStatus.former_prefix", &Locale::new("en")),
    Some("Former".to_string())
  );
  assert_eq!(
    dyn_catalog.message("memberStatus.former_prefix", &Locale::new("fr")),
    None
  );
}
