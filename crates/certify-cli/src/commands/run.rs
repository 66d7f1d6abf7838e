//! The `certify run` command: the interactive portal.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;

use certify_core::config::load_config_from;
use certify_core::model::{option_letter, McqItem, STANDARD_OPTION_COUNT};
use certify_core::session::{Admin, Session, Student};
use certify_core::{Portal, QuizError};

use crate::console::Console;

/// Whether a menu ended normally or hit end of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Eof,
}

/// Unwrap a prompt reply or leave the current menu at end of input.
macro_rules! or_eof {
    ($e:expr) => {
        match $e? {
            Some(v) => v,
            None => return Ok(Flow::Eof),
        }
    };
}

pub fn execute(config_path: Option<PathBuf>, catalog: Option<PathBuf>) -> Result<()> {
    let mut config = load_config_from(config_path.as_deref())?;
    if catalog.is_some() {
        config.catalog = catalog;
    }

    let mut portal = Portal::from_config(&config)?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());
    run_portal(&mut portal, &mut console)
}

/// Main menu loop. Returns when the user exits or input ends.
pub fn run_portal<R: BufRead, W: Write>(
    portal: &mut Portal,
    console: &mut Console<R, W>,
) -> Result<()> {
    loop {
        let choice =
            console.prompt_number("\nMenu:\n1. Student Login\n2. Admin Login\n3. Exit\nChoice: ")?;
        let flow = match choice {
            None | Some(Some(3)) => break,
            Some(Some(1)) => student_login(portal, console)?,
            Some(Some(2)) => admin_login(portal, console)?,
            Some(_) => Flow::Continue,
        };
        if flow == Flow::Eof {
            break;
        }
    }
    console.say("Goodbye.")?;
    Ok(())
}

fn student_login<R: BufRead, W: Write>(
    portal: &mut Portal,
    console: &mut Console<R, W>,
) -> Result<Flow> {
    let username = or_eof!(console.prompt("Username: "));

    if portal.is_registered(&username) {
        let password = or_eof!(console.prompt("Password: "));
        match portal.authenticate_student(&username, &password) {
            Ok(student) => run_session(console, student.into()),
            Err(_) => {
                console.say("Login failed.")?;
                Ok(Flow::Continue)
            }
        }
    } else {
        console.say("New user. Registering...")?;
        let roll = or_eof!(console.prompt("Roll: "));
        let name = or_eof!(console.prompt("Name: "));
        let password = or_eof!(console.prompt("Password: "));
        let student = portal.register_new_student(&roll, &name, &username, &password);
        console.say("Registration successful!")?;
        run_session(console, student.into())
    }
}

fn admin_login<R: BufRead, W: Write>(
    portal: &mut Portal,
    console: &mut Console<R, W>,
) -> Result<Flow> {
    let id = or_eof!(console.prompt("Admin ID: "));
    let password = or_eof!(console.prompt("Password: "));
    match portal.authenticate_admin(&id, &password) {
        Ok(admin) => run_session(console, admin.into()),
        Err(_) => {
            console.say("Admin login failed.")?;
            Ok(Flow::Continue)
        }
    }
}

fn run_session<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    session: Session<'_>,
) -> Result<Flow> {
    tracing::debug!(role = %session.role(), identity = %session.identity(), "session started");
    match session {
        Session::Student(student) => student_menu(console, student),
        Session::Admin(admin) => admin_menu(console, admin),
    }
}

fn student_menu<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    mut student: Student<'_>,
) -> Result<Flow> {
    console.say(format!("Welcome, {}.", student.account().display_name))?;
    loop {
        let choice = or_eof!(console.prompt_number(
            "\n1. Enroll\n2. Show Courses\n3. Attempt MCQs\n4. Logout\nChoice: "
        ));
        match choice {
            Some(1) => {
                show_available(console, &student)?;
                let code = or_eof!(console.prompt("Enter course code to enroll: "));
                match student.enroll(&code) {
                    Ok(name) => console.say(format!("Enrolled in {name} successfully."))?,
                    Err(_) => console.say("Invalid course code.")?,
                }
            }
            Some(2) => {
                console.say("Enrolled courses:")?;
                for name in student.list_enrolled() {
                    console.say(format!("- {name}"))?;
                }
            }
            Some(3) => {
                if student.enrolled_codes().is_empty() {
                    console.say("No enrolled courses.")?;
                    continue;
                }
                let attempts = student.attempt_all(console);
                console.take_deferred_error()?;
                for attempt in &attempts {
                    match &attempt.outcome {
                        Ok(score) => console.say(format!(
                            "{}: Score: {}% ({}/{})",
                            attempt.name, score.percent, score.correct, score.total
                        ))?,
                        Err(QuizError::EmptyBank(_)) => {
                            console.say(format!("{}: No MCQs available.", attempt.name))?
                        }
                        Err(e) => console.say(format!("{}: {e}", attempt.code))?,
                    }
                    let verdict = if attempt.passed() { "Passed" } else { "Failed" };
                    console.say(format!("{verdict} {}!", attempt.name))?;
                }
            }
            Some(4) => return Ok(Flow::Continue),
            _ => {}
        }
    }
}

fn show_available<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    student: &Student<'_>,
) -> Result<()> {
    console.say("Available courses:")?;
    for listing in student.available_courses() {
        console.say(format!("- {} ({})", listing.name, listing.code))?;
    }
    Ok(())
}

fn admin_menu<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    mut admin: Admin<'_>,
) -> Result<Flow> {
    loop {
        let choice = or_eof!(console.prompt_number(
            "\n1. Add Course\n2. Show Courses\n3. Add MCQs\n4. Logout\nChoice: "
        ));
        match choice {
            Some(1) => {
                let name = or_eof!(console.prompt("Course Name: "));
                let code = or_eof!(console.prompt("Course Code: "));
                if code.is_empty() {
                    console.say("Course code cannot be empty.")?;
                    continue;
                }
                if admin.create_course(&name, &code) {
                    console.say(format!("Course {code} replaced."))?;
                } else {
                    console.say(format!("Course {code} created."))?;
                }
            }
            Some(2) => {
                console.say("Available courses:")?;
                for listing in admin.list_courses() {
                    console.say(format!(
                        "- {} ({}), {} MCQ(s)",
                        listing.name, listing.code, listing.question_count
                    ))?;
                }
            }
            Some(3) => {
                if add_mcqs(console, &mut admin)? == Flow::Eof {
                    return Ok(Flow::Eof);
                }
            }
            Some(4) => return Ok(Flow::Continue),
            _ => {}
        }
    }
}

fn add_mcqs<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    admin: &mut Admin<'_>,
) -> Result<Flow> {
    let code = or_eof!(console.prompt("Course Code: "));
    if !admin.has_course(&code) {
        console.say("Invalid course code.")?;
        return Ok(Flow::Continue);
    }

    let reply = or_eof!(console.prompt_number("Number of MCQs: "));
    let Some(count) = reply else {
        console.say("Not a number.")?;
        return Ok(Flow::Continue);
    };

    let last = option_letter(STANDARD_OPTION_COUNT - 1).unwrap_or('D');
    let mut items = Vec::new();
    for _ in 0..count {
        let question = or_eof!(console.prompt("Question: "));
        let mut options = Vec::with_capacity(STANDARD_OPTION_COUNT);
        for idx in 0..STANDARD_OPTION_COUNT {
            let letter = option_letter(idx).unwrap_or('?');
            options.push(or_eof!(console.prompt(&format!("Option {letter}: "))));
        }

        let item = loop {
            let answer = or_eof!(console.prompt("Answer (A/B/C/D): "));
            let letter = answer.chars().next().unwrap_or(' ');
            match McqItem::new(question.as_str(), options.clone(), letter) {
                Ok(item) if answer.chars().count() == 1 => break item,
                _ => console.say(format!("Answer must be a letter from A to {last}."))?,
            }
        };
        items.push(item);
    }

    match admin.add_questions_to_course(&code, items) {
        Ok(total) => console.say(format!("Added {count} MCQ(s) to {code} ({total} total)."))?,
        Err(e) => console.say(e)?,
    }
    Ok(Flow::Continue)
}
