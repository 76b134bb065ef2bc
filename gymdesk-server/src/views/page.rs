//! The front-desk page: create form, student table, select + tabs

use chrono::NaiveDate;
use gymdesk_core::student::DATE_FORMAT;
use gymdesk_core::{Student, StudentDraft, StudentId, ValidationError};
use serde::{Deserialize, Serialize};

use super::flash::Flash;
use super::html::{document, escape};

const PAGE_TITLE: &str = "Osias Gym Management System";

/// Active tab of the manage section
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Update,
    Delete,
}

impl Tab {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    /// Read a `tab=` query value; anything unknown opens the update tab.
    pub fn from_param(value: &str) -> Self {
        match value {
            "delete" => Self::Delete,
            _ => Self::Update,
        }
    }
}

/// Student form fields as typed by the operator
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FormValues {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub birth_date: String,
    #[serde(default)]
    pub national_id: String,
}

impl FormValues {
    /// Pre-fill values for editing a stored student
    pub fn from_student(student: &Student) -> Self {
        Self {
            name: student.name.clone(),
            birth_date: student.birth_date_or_default().format(DATE_FORMAT).to_string(),
            national_id: student.national_id.clone(),
        }
    }

    pub fn to_draft(&self) -> Result<StudentDraft, ValidationError> {
        StudentDraft::parse(&self.name, &self.birth_date, &self.national_id)
    }
}

/// Everything the page shows for one request
#[derive(Debug, Clone)]
pub struct PageModel {
    pub students: Vec<Student>,
    /// Default for the create form's date picker
    pub today: NaiveDate,
    pub create_form: FormValues,
    pub create_flashes: Vec<Flash>,
    pub selected: Option<StudentId>,
    pub tab: Tab,
    /// Overrides the pre-filled edit form (after a rejected update).
    ///
    /// Only shown when `selected` names a listed student, so rejected input
    /// never lands in another student's form.
    pub edit_form: Option<FormValues>,
    pub manage_flashes: Vec<Flash>,
}

impl PageModel {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            students: Vec::new(),
            today,
            create_form: FormValues::default(),
            create_flashes: Vec::new(),
            selected: None,
            tab: Tab::default(),
            edit_form: None,
            manage_flashes: Vec::new(),
        }
    }

    /// The student shown in the manage tabs.
    ///
    /// Falls back to the first row when nothing is selected or the selected
    /// id no longer exists.
    pub fn selected_student(&self) -> Option<&Student> {
        self.selected
            .and_then(|id| self.students.iter().find(|s| s.id == id))
            .or_else(|| self.students.first())
    }

    /// Values for the update form of `student`
    fn edit_values(&self, student: &Student) -> FormValues {
        match &self.edit_form {
            Some(values) if self.selected == Some(student.id) => values.clone(),
            _ => FormValues::from_student(student),
        }
    }
}

/// Render the full page
pub fn render(model: &PageModel) -> String {
    let mut body = String::new();

    body.push_str(&format!(
        "<h1 class=\"title\">🏋️ {} 🏋️</h1>\n<h3 class=\"subtitle\">The best in town 😉</h3>\n",
        PAGE_TITLE
    ));
    body.push_str(&render_create_section(model));
    body.push_str(&render_list_section(model));
    body.push_str("<hr>\n");

    document(PAGE_TITLE, &body)
}

fn render_flashes(flashes: &[Flash]) -> String {
    flashes.iter().map(|f| f.to_html() + "\n").collect()
}

fn render_create_section(model: &PageModel) -> String {
    let form = &model.create_form;
    let birth_date = if form.birth_date.is_empty() {
        model.today.format(DATE_FORMAT).to_string()
    } else {
        form.birth_date.clone()
    };

    format!(
        r#"<section id="create">
<h2>Register New Student</h2>
<form method="post" action="/students">
<div class="columns">
<label>Student Name<input type="text" name="name" value="{name}" placeholder="Enter the full name"></label>
<label>National ID (CPF)<input type="text" name="national_id" value="{national_id}" placeholder="000.000.000-00"></label>
</div>
<label>Birth Date<input type="date" name="birth_date" value="{birth_date}"></label>
<button type="submit">Register Student</button>
</form>
{flashes}</section>
"#,
        name = escape(&form.name),
        national_id = escape(&form.national_id),
        birth_date = escape(&birth_date),
        flashes = render_flashes(&model.create_flashes),
    )
}

fn render_list_section(model: &PageModel) -> String {
    let mut out = String::from("<section id=\"students\">\n<h2>Registered Students</h2>\n");

    match model.selected_student() {
        None => {
            out.push_str(&render_flashes(&model.manage_flashes));
            out.push_str(
                &Flash::info()
                    .text("No students registered yet.")
                    .to_html(),
            );
            out.push('\n');
        }
        Some(selected) => {
            out.push_str(&render_table(&model.students));
            out.push_str(&render_manage(model, selected));
        }
    }

    out.push_str("</section>\n");
    out
}

fn render_table(students: &[Student]) -> String {
    let rows: String = students
        .iter()
        .map(|s| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                s.id,
                escape(&s.name),
                escape(&s.birth_date),
                escape(&s.national_id)
            )
        })
        .collect();

    format!(
        "<table>\n<thead><tr><th>id</th><th>name</th><th>birth date</th><th>national id</th></tr></thead>\n<tbody>\n{}</tbody>\n</table>\n",
        rows
    )
}

fn render_manage(model: &PageModel, selected: &Student) -> String {
    let options: String = model
        .students
        .iter()
        .map(|s| {
            format!(
                "<option value=\"{}\"{}>{}</option>\n",
                s.id,
                if s.id == selected.id { " selected" } else { "" },
                escape(&s.label())
            )
        })
        .collect();

    let tab_link = |tab: Tab, title: &str| {
        format!(
            "<a class=\"tab{}\" href=\"/?selected={}&amp;tab={}\">{}</a>",
            if model.tab == tab { " active" } else { "" },
            selected.id,
            tab.as_str(),
            title
        )
    };

    let content = match model.tab {
        Tab::Update => render_update_tab(model, selected),
        Tab::Delete => render_delete_tab(selected),
    };

    format!(
        r#"<h3>Manage Student</h3>
<form method="get" action="/">
<label>Select a student to update or delete
<select name="selected" onchange="this.form.submit()">
{options}</select></label>
<input type="hidden" name="tab" value="{tab}">
<noscript><button type="submit">Select</button></noscript>
</form>
<nav class="tabs">{update_link}{delete_link}</nav>
{flashes}{content}"#,
        options = options,
        tab = model.tab.as_str(),
        update_link = tab_link(Tab::Update, "Update Data"),
        delete_link = tab_link(Tab::Delete, "Delete Student"),
        flashes = render_flashes(&model.manage_flashes),
        content = content,
    )
}

fn render_update_tab(model: &PageModel, student: &Student) -> String {
    let values = model.edit_values(student);

    format!(
        r#"<div class="tab-panel" id="update">
<p><strong>Editing student:</strong> {current}</p>
<form method="post" action="/students/{id}/update">
<label>Name<input type="text" name="name" value="{name}"></label>
<label>Birth Date<input type="date" name="birth_date" value="{birth_date}"></label>
<label>National ID (CPF)<input type="text" name="national_id" value="{national_id}"></label>
<button type="submit">Update Student</button>
</form>
</div>
"#,
        current = escape(&student.name),
        id = student.id,
        name = escape(&values.name),
        birth_date = escape(&values.birth_date),
        national_id = escape(&values.national_id),
    )
}

fn render_delete_tab(student: &Student) -> String {
    let warning = Flash::warning().text(format!(
        "Warning: this action cannot be undone. Delete the student with ID {}?",
        student.id
    ));

    format!(
        r#"<div class="tab-panel" id="delete">
<p><strong>Deleting student:</strong> {name}</p>
{warning}
<form method="post" action="/students/{id}/delete">
<input type="hidden" name="confirm" value="true">
<button type="submit" class="danger">Confirm Deletion</button>
</form>
</div>
"#,
        name = escape(&student.name),
        warning = warning.to_html(),
        id = student.id,
    )
}
