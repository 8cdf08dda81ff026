#![cfg(test)]

use std::fmt::Write;

use super::*;

#[test]
fn test_push_char_and_nul() {
    let mut sb = StringBuilder::new();
    sb.push_char('t');
    sb.push_char('e');
    sb.push_char('s');
    sb.push_char('t');
    sb.push_nul();

    assert_eq!(&*sb, b"test\0");
    assert_eq!(sb.len(), 5);
}

#[test]
fn test_push_str() {
    let mut sb = StringBuilder::new();
    sb.push_str("test");

    assert_eq!(sb.as_str(), Ok("test"));
}

#[test]
fn test_concat() {
    let mut sb = StringBuilder::from("hello ");
    sb.concat(StringBuilder::from("world!"));

    assert_eq!(sb.as_str(), Ok("hello world!"));
}

#[test]
fn test_insert() {
    let mut sb = StringBuilder::from("hllo");
    sb.insert(1, b'e');

    assert_eq!(sb.as_str(), Ok("hello"));
}

#[test]
fn test_insert_str() {
    let mut sb = StringBuilder::from("hlo");
    sb.insert_str(1, "el");

    assert_eq!(sb.as_str(), Ok("hello"));
}

#[test]
fn test_multibyte_chars() {
    let mut sb = StringBuilder::new();
    sb.push_char('£');
    sb.push_char('€');

    assert_eq!(sb.as_str(), Ok("£€"));
    assert_eq!(sb.len(), 5, "Characters should be measured in encoded bytes.");
}

#[test]
fn test_write_trait() {
    let mut sb = StringBuilder::new();
    write!(sb, "{}-{}", 1, "two").expect("writing to a StringBuilder is infallible");

    assert_eq!(sb.as_str(), Ok("1-two"));
}

#[test]
fn test_as_str_rejects_invalid_utf8() {
    let mut sb = StringBuilder::new();
    sb.push_bytes(&[0xff, 0xfe]);

    assert!(sb.as_str().is_err());
    assert_eq!(&*sb, &[0xff, 0xfe]);
}

#[test]
fn test_collect_and_display() {
    let sb: StringBuilder = "hello".chars().collect();

    assert_eq!(format!("{sb}"), "hello");
    assert_eq!(sb.into_bytes().len(), 5);
}

#[test]
fn test_clear_and_empty_drop() {
    let mut sb = StringBuilder::from("scratch");
    sb.clear();
    assert!(sb.is_empty());

    drop(sb);
    drop(StringBuilder::new());
}
