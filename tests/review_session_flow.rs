mod support;

use cdreview::config::AppSettings;
use cdreview::egui_app::controller::{ReviewController, ReviewHost};
use cdreview::egui_app::ui::style::StatusTone;
use cdreview::review::{DatasetLayout, FlagOutcome, ReviewIntent, Session};
use support::{cdreview_env::CdreviewEnvGuard, dataset::write_dataset};

#[test]
fn three_sample_walkthrough_persists_across_sessions() {
    let temp = tempfile::tempdir().expect("create tempdir");
    let base = write_dataset(temp.path(), &["s1", "s2", "s3"]);
    let layout = DatasetLayout::open(&base).expect("open layout");

    let mut session = Session::open(layout.clone()).expect("open session");
    assert_eq!(session.cursor(), 0);
    session.next();
    session.next();
    assert_eq!(session.cursor(), 2);
    assert_eq!(session.current_identifier(), "s3");
    assert_eq!(session.next(), "s3");
    assert_eq!(session.cursor(), 2);

    assert_eq!(
        session.flag_current_as_error(true).expect("flag"),
        FlagOutcome::Recorded
    );
    let log = std::fs::read_to_string(layout.error_log_path()).expect("read log");
    let lines: Vec<_> = log.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with("s3"));

    session.prev();
    assert_eq!(session.cursor(), 1);
    session.persist_progress().expect("persist");

    let mut resumed = Session::open(layout).expect("reopen session");
    assert_eq!(resumed.restore_progress(), 1);
    assert_eq!(resumed.current_identifier(), "s2");
}

#[test]
fn progress_survives_every_in_range_position() {
    let temp = tempfile::tempdir().expect("create tempdir");
    let base = write_dataset(temp.path(), &["a", "b", "c", "d", "e"]);
    let layout = DatasetLayout::open(&base).expect("open layout");
    let mut session = Session::open(layout.clone()).expect("open session");
    for expected in 0..session.len() {
        session.persist_progress().expect("persist");
        let mut resumed = Session::open(layout.clone()).expect("reopen");
        assert_eq!(resumed.restore_progress(), expected);
        session.next();
    }
}

#[derive(Default)]
struct ScriptedHost {
    answers: Vec<bool>,
    clipboard: Option<String>,
    notices: Vec<String>,
}

impl ReviewHost for ScriptedHost {
    fn confirm_flag(&mut self, _identifier: &str) -> bool {
        self.answers.pop().unwrap_or(false)
    }

    fn copy_text(&mut self, text: &str) {
        self.clipboard = Some(text.to_string());
    }

    fn request_screenshot(&mut self) {}

    fn notify(&mut self, _tone: StatusTone, title: &str, _message: &str) {
        self.notices.push(title.to_string());
    }
}

#[test]
fn controller_drives_session_through_intents() {
    let temp = tempfile::tempdir().expect("create tempdir");
    let _env = CdreviewEnvGuard::set_config_home(temp.path().join("config"));
    let base = write_dataset(temp.path(), &["t1.png", "t2.png"]);

    let mut controller = ReviewController::new(AppSettings::default());
    controller.open_dataset(&base).expect("open dataset");
    let mut host = ScriptedHost {
        answers: vec![true, false],
        ..ScriptedHost::default()
    };

    controller.handle_intent(ReviewIntent::Flag, &mut host);
    controller.handle_intent(ReviewIntent::Flag, &mut host);
    controller.handle_intent(ReviewIntent::Next, &mut host);
    controller.handle_intent(ReviewIntent::CopyIdentifier, &mut host);
    controller.shutdown().expect("persist progress");

    assert_eq!(host.notices, vec!["Cancelled", "Error recorded"]);
    assert_eq!(host.clipboard.as_deref(), Some("t2.png"));
    let progress =
        std::fs::read_to_string(base.join("check").join("progress.txt")).expect("read progress");
    assert_eq!(progress, "1");
}
