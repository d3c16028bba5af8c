// ABOUTME: API module containing the HTTP handler functions for the alunos REST API.
// ABOUTME: The student CRUD handlers live in the students sub-module.

pub mod students;
