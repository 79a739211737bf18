mod common;
mod contact;
