//! Plain-text rendering.
//!
//! One function per view. Rows keep the order the registrar returns them in.

use std::io::{self, Write};

use registrar_core::{CourseReport, EnrollmentReport, RosterEntry, ScheduleEntry, TeacherReport};

/// Course roster, one student per line.
pub fn roster(out: &mut impl Write, course: &str, entries: &[RosterEntry], full: bool) -> io::Result<()> {
    let status = if full { ", full" } else { "" };
    writeln!(out, "{course}: {} enrolled{status}", entries.len())?;
    entries_or_none(out, entries.iter().map(|e| (e.id.as_str(), e.name.as_str())), "no students")
}

/// Student or teacher schedule, one course per line.
pub fn schedule(out: &mut impl Write, owner: &str, entries: &[ScheduleEntry]) -> io::Result<()> {
    writeln!(out, "{owner}: {} courses", entries.len())?;
    entries_or_none(out, entries.iter().map(|e| (e.id.as_str(), e.name.as_str())), "no courses")
}

/// Distinct students across a teacher's courses.
pub fn teacher_roster(
    out: &mut impl Write,
    teacher: &str,
    courses: usize,
    entries: &[RosterEntry],
) -> io::Result<()> {
    writeln!(out, "{teacher}: {} students across {courses} courses", entries.len())?;
    entries_or_none(out, entries.iter().map(|e| (e.id.as_str(), e.name.as_str())), "no students")
}

/// Enrollment summary followed by one line per student.
pub fn enrollment_report(out: &mut impl Write, report: &EnrollmentReport) -> io::Result<()> {
    writeln!(out, "students:      {}", report.total_students)?;
    writeln!(out, "courses:       {}", report.total_courses)?;
    writeln!(out, "enrollments:   {}", report.total_enrollments)?;
    writeln!(out, "unenrolled:    {}", report.students_without_courses)?;
    writeln!(out, "avg per student: {:.2}", report.average_courses_per_student)?;

    for s in &report.students {
        let courses: Vec<&str> = s.courses.iter().map(|c| c.as_str()).collect();
        writeln!(out, "  {:<8} {:<24} {}", s.id, s.name, courses.join(", "))?;
    }
    Ok(())
}

/// Seat usage summary followed by one line per course.
pub fn course_report(out: &mut impl Write, report: &CourseReport) -> io::Result<()> {
    writeln!(out, "capacity:      {}", report.total_capacity)?;
    writeln!(out, "enrolled:      {}", report.total_enrolled)?;
    writeln!(out, "full courses:  {}", report.full_courses)?;

    for c in &report.courses {
        let marker = if c.is_full { " FULL" } else { "" };
        writeln!(
            out,
            "  {:<8} {:<32} {:>4}/{:<4} {:>5.1}%{marker}",
            c.id,
            c.name,
            c.enrolled,
            c.capacity,
            c.fill_rate * 100.0
        )?;
    }
    Ok(())
}

/// Teaching summary followed by one line per teacher.
pub fn teacher_report(out: &mut impl Write, report: &TeacherReport) -> io::Result<()> {
    writeln!(out, "teachers:      {}", report.total_teachers)?;
    writeln!(out, "unassigned:    {}", report.teachers_without_courses)?;

    for t in &report.teachers {
        let courses: Vec<&str> = t.courses.iter().map(|c| c.as_str()).collect();
        writeln!(out, "  {:<8} {:<24} {:>3} students  {}", t.id, t.name, t.student_count, courses.join(", "))?;
    }
    Ok(())
}

fn entries_or_none<'a>(
    out: &mut impl Write,
    mut entries: impl Iterator<Item = (&'a str, &'a str)>,
    empty: &str,
) -> io::Result<()> {
    let Some(first) = entries.next() else {
        return writeln!(out, "  ({empty})");
    };
    for (id, name) in std::iter::once(first).chain(entries) {
        writeln!(out, "  {id:<8} {name}")?;
    }
    Ok(())
}
