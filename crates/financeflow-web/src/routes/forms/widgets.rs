//! HTML building blocks shared by the three forms

use financeflow_core::{Draft, Field, FormKind, FormState, NotificationKind};
use financeflow_utils::escape_html;
use std::time::Instant;

/// DOM id of a field's input
pub fn input_id(kind: FormKind, field: Field) -> String {
    format!("{}-{}", kind, field.name())
}

/// Message slot under a field; edits swap it out by id
pub fn error_slot(kind: FormKind, field: Field, message: Option<&str>) -> String {
    match message {
        Some(message) => format!(
            r#"<p id='{}-error' class='text-red-500 text-sm mt-1'>{}</p>"#,
            input_id(kind, field),
            escape_html(message)
        ),
        None => format!(r#"<p id='{}-error'></p>"#, input_id(kind, field)),
    }
}

/// Attributes that report every keystroke to the edit endpoint
fn edit_attrs(kind: FormKind, field: Field) -> String {
    format!(
        r#"hx-post='/forms/{}/edit' hx-trigger='input changed delay:150ms, change' hx-vals='{{"field": "{}"}}' hx-target='#{}-error' hx-swap='outerHTML'"#,
        kind,
        field.name(),
        input_id(kind, field)
    )
}

fn digit_filter(field: Field) -> &'static str {
    if field.is_account_id() {
        r#"inputmode='numeric' oninput="this.value = this.value.replace(/\D/g, '')""#
    } else {
        ""
    }
}

fn input_class(error: Option<&str>) -> &'static str {
    if error.is_some() {
        "w-full px-3 py-2 border border-red-500 rounded-md focus:outline-none"
    } else {
        "w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:border-blue-500"
    }
}

/// Labelled text input
pub fn text_input<D: Draft>(state: &FormState<D>, field: Field, label: &str) -> String {
    let kind = state.kind();
    let value = state.draft().value(field).unwrap_or_default();
    let error = state.errors().get(field);
    format!(
        r#"<div class='mb-4'>
            <label for='{id}' class='block text-sm font-medium text-gray-700 mb-2'>{label}<span class='text-red-500 ml-1'>*</span></label>
            <input id='{id}' name='{name}' type='text' autocomplete='off' value='{value}' class='{class}' {filter} {edit}>
            {error}
        </div>"#,
        id = input_id(kind, field),
        label = label,
        name = field.name(),
        value = escape_html(value),
        class = input_class(error),
        filter = digit_filter(field),
        edit = edit_attrs(kind, field),
        error = error_slot(kind, field, error),
    )
}

/// Digit-only input with a popup of known account ids
pub fn selector_input<D: Draft>(state: &FormState<D>, field: Field, label: &str, placeholder: &str) -> String {
    let kind = state.kind();
    let id = input_id(kind, field);
    let value = state.draft().value(field).unwrap_or_default();
    let error = state.errors().get(field);
    format!(
        r#"<div class='mb-4' data-selector>
            <label for='{id}' class='block text-sm font-medium text-gray-700 mb-2'>{label}<span class='text-red-500 ml-1'>*</span></label>
            <div class='relative'>
                <div class='relative flex items-center'>
                    <input id='{id}' name='{name}' type='text' autocomplete='off' value='{value}' placeholder='{placeholder}'
                        class='{class} pr-16' {filter} onkeydown="selectorKey(event, '{id}')" {edit}>
                    <div class='absolute right-2 flex items-center gap-1'>
                        <button type='button' onclick="selectorClear('{id}')" class='p-1 hover:bg-gray-100 rounded text-gray-400 hover:text-gray-600' title='Clear'>&times;</button>
                        <button type='button' onclick="selectorToggle('{id}')" class='p-1 hover:bg-gray-100 rounded text-gray-400 hover:text-gray-600' title='Show accounts'>&#9662;</button>
                    </div>
                </div>
                <div id='{id}-suggest' data-popup
                    hx-get='/accounts/suggest'
                    hx-trigger='focus from:#{id}, input changed from:#{id}, selector-open'
                    hx-include='#{id}'
                    hx-vals='{{"form": "{kind}", "field": "{name}"}}'
                    hx-swap='innerHTML'></div>
            </div>
            {error}
        </div>"#,
        id = id,
        kind = kind,
        label = label,
        name = field.name(),
        value = escape_html(value),
        placeholder = placeholder,
        class = input_class(error),
        filter = digit_filter(field),
        edit = edit_attrs(kind, field),
        error = error_slot(kind, field, error),
    )
}

/// Submit button whose label switches while the form's request is in flight
pub fn submit_button(label: &str, busy_label: &str) -> String {
    format!(
        r#"<button type='submit' class='w-full mt-6 px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700 disabled:opacity-50 disabled:cursor-not-allowed'>
            <span class='idle-label'>{}</span><span class='busy-label'>{}</span>
        </button>"#,
        label, busy_label
    )
}

/// The form's notification, polling itself away once its deadline passes
pub fn notification<D: Draft>(state: &mut FormState<D>, now: Instant) -> String {
    let kind = state.kind();
    let slot = state.notification();
    let remaining = slot.remaining(now);
    let Some(note) = slot.current(now) else {
        return format!(r#"<div id='{}-notification'></div>"#, kind);
    };

    let (class, icon) = match note.kind {
        NotificationKind::Success => ("bg-green-50 border-green-200 text-green-700", "&#10003;"),
        NotificationKind::Error => ("bg-red-50 border-red-200 text-red-700", "&#9888;"),
    };
    let delay_ms = remaining.map(|left| left.as_millis()).unwrap_or_default();

    format!(
        r#"<div id='{kind}-notification' hx-get='/notifications/{kind}' hx-trigger='load delay:{delay}ms' hx-swap='outerHTML'>
            <div class='mt-4 p-3 sm:p-4 border rounded-lg flex items-start sm:items-center gap-2 text-sm sm:text-base {class}' data-kind='{note_kind}'>
                <span class='flex-shrink-0'>{icon}</span>
                <span class='break-words'>{message}</span>
            </div>
        </div>"#,
        kind = kind,
        delay = delay_ms,
        class = class,
        note_kind = note.kind,
        icon = icon,
        message = escape_html(&note.message),
    )
}

/// Form element wiring: posts to `action`, swaps itself, drives the busy overlay
pub fn form_open(kind: FormKind, action: &str) -> String {
    format!(
        r#"<form id='{}-form' hx-post='{}' hx-swap='outerHTML' hx-indicator='#loader' hx-disabled-elt='find button[type="submit"]'>"#,
        kind, action
    )
}
