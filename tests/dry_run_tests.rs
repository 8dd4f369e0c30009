use assert_cmd::prelude::*;
use predicates::prelude::*;

mod common;
use common::stub::{create_file, TestView};

#[cfg(test)]
mod dry_run_tests {
    use super::*;

    #[test]
    fn test_dry_run_checkin_never_reaches_the_tool() -> anyhow::Result<()> {
        let view = TestView::new()?;
        view.clearnav()?
            .args(["-t", "checkin", "-m", "a message", "a.txt"])
            .assert()
            .success();

        assert!(view.invocations()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_dry_run_checkout_never_reaches_the_tool() -> anyhow::Result<()> {
        let view = TestView::new()?;
        view.clearnav()?
            .args(["--test", "checkout", "a.txt"])
            .assert()
            .success();

        assert!(view.invocations()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_dry_run_still_surveys_for_auto_commands() -> anyhow::Result<()> {
        let mut view = TestView::new()?;
        create_file(&view, "edited.c", "content")?;
        view.respond("ls", "edited.c@@/main/CHECKEDOUT from /main/2\n")?;

        view.clearnav()?
            .args(["-t", "auto-checkin", "-m", "msg"])
            .assert()
            .success();

        // The read-only survey runs; the check-in itself does not.
        let invocations = view.invocations()?;
        assert_eq!(invocations.len(), 1);
        assert!(invocations[0].starts_with("ls -recurse"));
        Ok(())
    }

    #[test]
    fn test_dry_run_update_uses_native_preview() -> anyhow::Result<()> {
        let mut view = TestView::new()?;
        view.respond("pwv", &view.path().display().to_string())?;

        view.clearnav()?
            .args(["-t", "update", "-nomerge"])
            .assert()
            .success();

        // update is driven through the tool's own -print preview rather
        // than being skipped.
        let invocations = view.invocations()?;
        let update = invocations
            .iter()
            .find(|line| line.starts_with("update "))
            .expect("update invocation");
        assert!(update.contains("-print"));
        Ok(())
    }

    #[test]
    fn test_real_run_omits_print_flag() -> anyhow::Result<()> {
        let mut view = TestView::new()?;
        view.respond("pwv", &view.path().display().to_string())?;

        view.clearnav()?
            .args(["update", "-nomerge"])
            .assert()
            .success();

        let invocations = view.invocations()?;
        let update = invocations
            .iter()
            .find(|line| line.starts_with("update "))
            .expect("update invocation");
        assert!(!update.contains("-print"));
        assert!(update.contains("-force"));
        Ok(())
    }

    #[test]
    fn test_dry_run_move_reports_nothing_but_succeeds() -> anyhow::Result<()> {
        let view = TestView::new()?;
        view.clearnav()?
            .args(["-t", "move", "old.txt", "new.txt"])
            .assert()
            .success()
            .stdout(predicate::str::contains("REMOVED").not());

        // The parent-directory survey is read-only and may run; mkelem,
        // rmname and move must not.
        for line in view.invocations()? {
            assert!(
                line.starts_with("ls "),
                "unexpected mutating invocation: {line}"
            );
        }
        Ok(())
    }
}
