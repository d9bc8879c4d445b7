// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Proteus CLI entrypoint.
//!
//! By default this runs the interactive workbench against the hosted diagram store. `--demo`
//! runs against a seeded in-memory store, and `--reconcile` runs the duplicate-name cleanup
//! headlessly and exits.

use std::error::Error;

use proteus::cache::{FileSessionCache, MemorySessionCache};
use proteus::model::{ProjectId, Scope, UserId};
use proteus::reconcile::reconcile_duplicates;
use proteus::select::SelectionController;
use proteus::store::RestDiagramStore;

const STORE_URL_ENV: &str = "PROTEUS_STORE_URL";
const STORE_KEY_ENV: &str = "PROTEUS_STORE_KEY";

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} --project <uuid> --user <uuid> [--store-url <url>] [--store-key <key>]\n  {program} --project <uuid> --user <uuid> --reconcile\n  {program} --demo [--reconcile]\n\nThe store URL and key fall back to the {STORE_URL_ENV} and {STORE_KEY_ENV} environment\nvariables when the flags are omitted.\n\n--demo runs against a seeded in-memory store and cannot be combined with\n--project/--user/--store-url/--store-key.\n\n--reconcile removes duplicate diagram names headlessly (keeping the most recently\nupdated diagram of each name) and exits without starting the TUI."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    demo: bool,
    reconcile: bool,
    project: Option<String>,
    user: Option<String>,
    store_url: Option<String>,
    store_key: Option<String>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--reconcile" => {
                if options.reconcile {
                    return Err(());
                }
                options.reconcile = true;
            }
            "--project" => {
                if options.project.is_some() {
                    return Err(());
                }
                options.project = Some(args.next().ok_or(())?);
            }
            "--user" => {
                if options.user.is_some() {
                    return Err(());
                }
                options.user = Some(args.next().ok_or(())?);
            }
            "--store-url" => {
                if options.store_url.is_some() {
                    return Err(());
                }
                options.store_url = Some(args.next().ok_or(())?);
            }
            "--store-key" => {
                if options.store_key.is_some() {
                    return Err(());
                }
                options.store_key = Some(args.next().ok_or(())?);
            }
            _ => return Err(()),
        }
    }

    if options.demo
        && (options.project.is_some()
            || options.user.is_some()
            || options.store_url.is_some()
            || options.store_key.is_some())
    {
        return Err(());
    }

    Ok(options)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "proteus".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        // Logging goes to stderr, which only a headless run can use without corrupting the
        // raw-mode screen.
        if options.reconcile {
            env_logger::init();
        }

        if options.demo {
            let (store, scope) = proteus::tui::demo_store();

            if options.reconcile {
                let report = reconcile_duplicates(&store, &scope)?;
                println!(
                    "removed {} duplicate diagram(s); {} delete(s) failed",
                    report.removed, report.failed
                );
                return Ok(());
            }

            let selection = SelectionController::new(Box::new(MemorySessionCache::new()));
            proteus::tui::run(Box::new(store), scope, selection)?;
            return Ok(());
        }

        let project = options
            .project
            .ok_or("missing --project <uuid> (or use --demo)")?;
        let user = options.user.ok_or("missing --user <uuid> (or use --demo)")?;
        let project_id = ProjectId::parse(&project)
            .map_err(|err| format!("invalid --project value {project:?}: {err}"))?;
        let owner_user_id =
            UserId::parse(&user).map_err(|err| format!("invalid --user value {user:?}: {err}"))?;
        let scope = Scope::new(project_id, owner_user_id);

        let store_url = options
            .store_url
            .or_else(|| std::env::var(STORE_URL_ENV).ok())
            .ok_or("missing store URL (--store-url or PROTEUS_STORE_URL)")?;
        let store_key = options
            .store_key
            .or_else(|| std::env::var(STORE_KEY_ENV).ok())
            .ok_or("missing store key (--store-key or PROTEUS_STORE_KEY)")?;
        let store = RestDiagramStore::connect(store_url, store_key)?;

        if options.reconcile {
            let report = reconcile_duplicates(&store, &scope)?;
            println!(
                "removed {} duplicate diagram(s); {} delete(s) failed",
                report.removed, report.failed
            );
            return Ok(());
        }

        let selection = SelectionController::new(Box::new(FileSessionCache::for_user(
            scope.owner_user_id(),
        )));
        proteus::tui::run(Box::new(store), scope, selection)?;
        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("proteus: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_options, CliOptions};

    #[test]
    fn parses_empty_args() {
        let options = parse_options(std::iter::empty()).expect("parse options");
        assert_eq!(options, CliOptions::default());
    }

    #[test]
    fn parses_demo_flag() {
        let options = parse_options(["--demo".to_owned()].into_iter()).expect("parse options");
        assert!(options.demo);
        assert!(!options.reconcile);
    }

    #[test]
    fn parses_demo_with_reconcile() {
        let options = parse_options(["--demo".to_owned(), "--reconcile".to_owned()].into_iter())
            .expect("parse options");
        assert!(options.demo);
        assert!(options.reconcile);
    }

    #[test]
    fn parses_scope_and_store_flags() {
        let options = parse_options(
            [
                "--project".to_owned(),
                "11111111-1111-1111-1111-111111111111".to_owned(),
                "--user".to_owned(),
                "22222222-2222-2222-2222-222222222222".to_owned(),
                "--store-url".to_owned(),
                "https://example.supabase.co".to_owned(),
                "--store-key".to_owned(),
                "secret".to_owned(),
            ]
            .into_iter(),
        )
        .expect("parse options");

        assert_eq!(
            options.project.as_deref(),
            Some("11111111-1111-1111-1111-111111111111")
        );
        assert_eq!(
            options.user.as_deref(),
            Some("22222222-2222-2222-2222-222222222222")
        );
        assert_eq!(
            options.store_url.as_deref(),
            Some("https://example.supabase.co")
        );
        assert_eq!(options.store_key.as_deref(), Some("secret"));
    }

    #[test]
    fn rejects_demo_with_scope_flags() {
        parse_options(["--demo".to_owned(), "--project".to_owned(), "x".to_owned()].into_iter())
            .unwrap_err();

        parse_options(
            [
                "--store-url".to_owned(),
                "https://example".to_owned(),
                "--demo".to_owned(),
            ]
            .into_iter(),
        )
        .unwrap_err();
    }

    #[test]
    fn rejects_unknown_args() {
        parse_options(["--nope".to_owned()].into_iter()).unwrap_err();
        parse_options(["positional".to_owned()].into_iter()).unwrap_err();
    }

    #[test]
    fn rejects_duplicate_flags() {
        parse_options(["--demo".to_owned(), "--demo".to_owned()].into_iter()).unwrap_err();

        parse_options(
            [
                "--project".to_owned(),
                "a".to_owned(),
                "--project".to_owned(),
                "b".to_owned(),
            ]
            .into_iter(),
        )
        .unwrap_err();
    }

    #[test]
    fn rejects_missing_flag_values() {
        parse_options(["--project".to_owned()].into_iter()).unwrap_err();
        parse_options(["--user".to_owned()].into_iter()).unwrap_err();
        parse_options(["--store-url".to_owned()].into_iter()).unwrap_err();
        parse_options(["--store-key".to_owned()].into_iter()).unwrap_err();
    }
}
