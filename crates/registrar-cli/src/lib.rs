//! Command layer for the `registrar` binary.
//!
//! ## Responsibilities
//!
//! - Define the subcommand vocabulary (`clap` derive)
//! - Apply one command to a [`Registrar`]
//! - Render results as plain text to any writer
//!
//! ## Design
//!
//! Commands are executed against a borrowed registrar and write to a
//! borrowed sink, so the binary owns loading, saving and stdout while tests
//! drive [`execute`] with an in-memory buffer.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
pub mod render;

use std::io::Write;

use clap::{Subcommand, ValueEnum};
pub use error::CliError;
use registrar_core::{Course, Registrar};

/// Which aggregate report to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
    /// Per-student enrollment load.
    Enrollment,
    /// Per-course seat usage.
    Course,
    /// Per-teacher workload.
    Teacher,
}

/// One registrar command.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Register a student
    AddStudent {
        /// Student ID
        id: String,
        /// Display name
        name: String,
    },
    /// Register a course
    AddCourse {
        /// Course ID
        id: String,
        /// Display name
        name: String,
        /// Seat limit (defaults to --default-capacity)
        #[arg(long)]
        capacity: Option<u32>,
    },
    /// Register a teacher
    AddTeacher {
        /// Teacher ID
        id: String,
        /// Display name
        name: String,
    },
    /// Remove a student and all their enrollments
    RemoveStudent {
        /// Student ID
        id: String,
    },
    /// Remove a course, its roster and its teacher assignments
    RemoveCourse {
        /// Course ID
        id: String,
    },
    /// Remove a teacher and all their assignments
    RemoveTeacher {
        /// Teacher ID
        id: String,
    },
    /// Enroll a student in a course
    Enroll {
        /// Student ID
        student: String,
        /// Course ID
        course: String,
    },
    /// Drop a student from a course
    Drop {
        /// Student ID
        student: String,
        /// Course ID
        course: String,
    },
    /// Assign a teacher to a course
    Assign {
        /// Teacher ID
        teacher: String,
        /// Course ID
        course: String,
    },
    /// Remove a teacher from a course
    Unassign {
        /// Teacher ID
        teacher: String,
        /// Course ID
        course: String,
    },
    /// List the students enrolled in a course
    Roster {
        /// Course ID
        course: String,
    },
    /// List the courses a student is enrolled in
    Schedule {
        /// Student ID
        student: String,
    },
    /// List the courses a teacher is assigned to
    TeacherSchedule {
        /// Teacher ID
        teacher: String,
    },
    /// List every student a teacher teaches
    TeacherRoster {
        /// Teacher ID
        teacher: String,
    },
    /// Print an aggregate report
    Report {
        /// Report to print
        #[arg(value_enum)]
        kind: ReportKind,
    },
}

impl Command {
    /// Whether the command changes registrar state and must be saved.
    pub fn is_mutating(&self) -> bool {
        !matches!(
            self,
            Self::Roster { .. }
                | Self::Schedule { .. }
                | Self::TeacherSchedule { .. }
                | Self::TeacherRoster { .. }
                | Self::Report { .. }
        )
    }
}

/// Apply `command` to `registrar`, writing human-readable output to `out`.
///
/// # Errors
///
/// - `CliError::Registrar` if the registrar rejects the command
/// - `CliError::Io` if writing to `out` fails
pub fn execute(registrar: &mut Registrar, command: &Command, out: &mut impl Write) -> Result<(), CliError> {
    match command {
        Command::AddStudent { id, name } => {
            registrar.add_student(id.as_str(), name.as_str())?;
            writeln!(out, "added student {id}")?;
        },
        Command::AddCourse { id, name, capacity } => {
            registrar.add_course(id.as_str(), name.as_str(), *capacity)?;
            let capacity = registrar.find_course(id.as_str()).map_or(0, Course::capacity);
            writeln!(out, "added course {id} (capacity {capacity})")?;
        },
        Command::AddTeacher { id, name } => {
            registrar.add_teacher(id.as_str(), name.as_str())?;
            writeln!(out, "added teacher {id}")?;
        },
        Command::RemoveStudent { id } => {
            let student = registrar.remove_student(id.as_str())?;
            writeln!(out, "removed student {} ({})", student.id(), student.name())?;
        },
        Command::RemoveCourse { id } => {
            let course = registrar.remove_course(id.as_str())?;
            writeln!(out, "removed course {} ({})", course.id(), course.name())?;
        },
        Command::RemoveTeacher { id } => {
            let teacher = registrar.remove_teacher(id.as_str())?;
            writeln!(out, "removed teacher {} ({})", teacher.id(), teacher.name())?;
        },
        Command::Enroll { student, course } => {
            registrar.enroll(student.as_str(), course.as_str())?;
            let enrolled = registrar.course_enrollment_count(course.as_str())?;
            writeln!(out, "enrolled {student} in {course} ({enrolled} enrolled)")?;
        },
        Command::Drop { student, course } => {
            registrar.drop_course(student.as_str(), course.as_str())?;
            writeln!(out, "dropped {student} from {course}")?;
        },
        Command::Assign { teacher, course } => {
            registrar.assign_teacher(teacher.as_str(), course.as_str())?;
            writeln!(out, "assigned {teacher} to {course}")?;
        },
        Command::Unassign { teacher, course } => {
            registrar.unassign_teacher(teacher.as_str(), course.as_str())?;
            writeln!(out, "unassigned {teacher} from {course}")?;
        },
        Command::Roster { course } => {
            let roster = registrar.course_roster(course.as_str())?;
            let full = registrar.is_course_full(course.as_str())?;
            render::roster(out, course, &roster, full)?;
        },
        Command::Schedule { student } => {
            let schedule = registrar.student_schedule(student.as_str())?;
            render::schedule(out, student, &schedule)?;
        },
        Command::TeacherSchedule { teacher } => {
            let schedule = registrar.teacher_schedule(teacher.as_str())?;
            render::schedule(out, teacher, &schedule)?;
        },
        Command::TeacherRoster { teacher } => {
            let roster = registrar.teacher_roster(teacher.as_str())?;
            let courses = registrar.teacher_course_count(teacher.as_str())?;
            render::teacher_roster(out, teacher, courses, &roster)?;
        },
        Command::Report { kind: ReportKind::Enrollment } => {
            render::enrollment_report(out, &registrar.generate_enrollment_report())?;
        },
        Command::Report { kind: ReportKind::Course } => {
            render::course_report(out, &registrar.generate_course_report())?;
        },
        Command::Report { kind: ReportKind::Teacher } => {
            render::teacher_report(out, &registrar.generate_teacher_report())?;
        },
    }
    Ok(())
}
