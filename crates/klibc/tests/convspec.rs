use klibc::convspec::{Conv, ConvFlags, LengthMod, SpecError, Token, parse};

fn parse_spec(fmt: &[u8]) -> klibc::convspec::ConvSpec {
    match parse(fmt) {
        Ok(Token::Spec { spec, len }) => {
            assert_eq!(len, fmt.len(), "specifier did not span the whole input");
            spec
        }
        other => panic!("expected a specifier for {:?}, got {:?}", fmt, other),
    }
}

#[test]
fn test_literal_run() {
    println!("=== Testing convspec: Literal Run ===");
    let token = parse(b"hello, %s!").unwrap();
    println!("Token: {:?}", token);
    assert_eq!(token, Token::Literal(7));

    assert_eq!(parse(b"no specifier here").unwrap(), Token::Literal(17));
    println!("✓ Literal runs stop at the next '%'");
}

#[test]
fn test_percent_escape() {
    let token = parse(b"%%rest").unwrap();
    match token {
        Token::Spec { spec, len } => {
            assert_eq!(spec.conv, Conv::Percent);
            assert_eq!(len, 2);
            assert_eq!(spec.flags, ConvFlags::empty());
        }
        other => panic!("unexpected token {:?}", other),
    }
}

#[test]
fn test_full_signed_specifier() {
    println!("=== Testing convspec: Full Signed Specifier ===");
    let spec = parse_spec(b"%1337$-42.512hhd");
    println!("Parsed: {:?}", spec);

    assert_eq!(spec.argno, Some(1337));
    assert_eq!(spec.flags, ConvFlags::MINUS);
    assert_eq!(spec.width, Some(42));
    assert_eq!(spec.prec, Some(512));
    assert_eq!(spec.length, Some(LengthMod::Char));
    assert_eq!(spec.conv, Conv::SignedDec);
    println!("✓ Every sub-field recognized");
}

#[test]
fn test_full_hex_specifier() {
    let spec = parse_spec(b"%1337$#-42.512hhx");
    assert_eq!(spec.argno, Some(1337));
    assert_eq!(spec.flags, ConvFlags::ALTERNATE | ConvFlags::MINUS);
    assert_eq!(spec.width, Some(42));
    assert_eq!(spec.prec, Some(512));
    assert_eq!(spec.length, Some(LengthMod::Char));
    assert_eq!(spec.conv, Conv::Unsigned { base: 16, upper: false });
}

#[test]
fn test_unsigned_base_mapping() {
    assert_eq!(parse_spec(b"%u").conv, Conv::Unsigned { base: 10, upper: false });
    assert_eq!(parse_spec(b"%o").conv, Conv::Unsigned { base: 8, upper: false });
    assert_eq!(parse_spec(b"%x").conv, Conv::Unsigned { base: 16, upper: false });
    assert_eq!(parse_spec(b"%X").conv, Conv::Unsigned { base: 16, upper: true });
}

#[test]
fn test_length_modifiers() {
    assert_eq!(parse_spec(b"%hhd").length, Some(LengthMod::Char));
    assert_eq!(parse_spec(b"%hd").length, Some(LengthMod::Short));
    assert_eq!(parse_spec(b"%ld").length, Some(LengthMod::Long));
    assert_eq!(parse_spec(b"%lld").length, Some(LengthMod::LongLong));
    assert_eq!(parse_spec(b"%jd").length, Some(LengthMod::Max));
    assert_eq!(parse_spec(b"%zd").length, Some(LengthMod::Size));
    assert_eq!(parse_spec(b"%td").length, Some(LengthMod::PtrDiff));
    assert_eq!(parse_spec(b"%ls").length, Some(LengthMod::Long));
}

#[test]
fn test_zero_padded_width() {
    let spec = parse_spec(b"%042d");
    assert_eq!(spec.flags, ConvFlags::ZERO);
    assert_eq!(spec.width, Some(42));
}

#[test]
fn test_bare_dot_precision() {
    // A '.' with no digits still records precision zero.
    let spec = parse_spec(b"%.s");
    assert_eq!(spec.prec, Some(0));
    assert_eq!(spec.conv, Conv::Str);

    assert_eq!(parse_spec(b"%.5s").prec, Some(5));
}

#[test]
fn test_oversized_width() {
    // The widest representable width parses fine.
    let spec = parse_spec(b"%18446744073709551615d");
    assert_eq!(spec.width, Some(u64::MAX));

    // Past that, the numeric parser stops at the overflowing digit; the
    // digits it leaves behind land on the conversion character and fail.
    assert_eq!(parse(b"%99999999999999999999999d"), Err(SpecError::Syntax));
}

#[test]
fn test_rejections() {
    println!("=== Testing convspec: Rejected Specifiers ===");
    let cases: &[&[u8]] = &[
        b"%#d",   // alternate form on signed decimal
        b"% +d",  // space and plus together
        b"%+ d",
        b"%-0d",  // left-justify and zero-pad together
        b"%0-d",
        b"%Ld",   // long double on an integer conversion
        b"%Lx",
        b"%#u",   // alternate form outside hexadecimal
        b"%#o",
        b"%+x",   // sign flags on unsigned
        b"% u",
        b"%0c",   // c/s take only '-'
        b"%#s",
        b"%.3c",  // precision on %c
        b"%hs",   // c/s take only 'l'
        b"%hc",
        b"%hhc",
        b"%5%",   // '%%' tolerates nothing
        b"%-%",
        b"%.%",
        b"%.4%",
        b"%+%",
        b"%l%",
        b"%1$%",
        b"%--5d", // duplicate flag strands the rest of the field
        b"%q",    // unknown conversion character
        b"%",     // template ends inside the specifier
        b"%5",
    ];
    for &fmt in cases {
        let got = parse(fmt);
        println!("{:?} -> {:?}", core::str::from_utf8(fmt).unwrap(), got);
        assert_eq!(got, Err(SpecError::Syntax), "case {:?}", fmt);
    }
    println!("✓ All malformed specifiers rejected");
}

#[test]
fn test_unsupported_conversions() {
    for &fmt in &[
        &b"%f"[..],
        b"%e",
        b"%g",
        b"%a",
        b"%A",
        b"%E",
        b"%F",
        b"%G",
        b"%i",
        b"%n",
        b"%p",
        b"%D",
        b"%O",
        b"%U",
    ] {
        assert_eq!(parse(fmt), Err(SpecError::Unsupported), "case {:?}", fmt);
    }
}

#[test]
fn test_parse_is_pure() {
    // Same input bytes, same token, every time.
    let fmt = b"%1$#-9.7llX";
    let first = parse(fmt).unwrap();
    let second = parse(fmt).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_dollar_without_digits_is_not_an_argno() {
    // '$' alone never starts a positional index; it lands on the conversion
    // character and fails there.
    assert_eq!(parse(b"%$d"), Err(SpecError::Syntax));
}

#[test]
fn test_consumed_length_drives_resumption() {
    println!("=== Testing convspec: Token Lengths ===");
    let fmt = b"value=%08lx end";
    let Token::Literal(lit) = parse(fmt).unwrap() else {
        panic!("expected a literal");
    };
    assert_eq!(lit, 6);

    let Token::Spec { spec, len } = parse(&fmt[lit..]).unwrap() else {
        panic!("expected a specifier");
    };
    assert_eq!(len, 5);
    assert_eq!(spec.flags, ConvFlags::ZERO);
    assert_eq!(spec.width, Some(8));
    assert_eq!(spec.length, Some(LengthMod::Long));

    let Token::Literal(tail) = parse(&fmt[lit + len..]).unwrap() else {
        panic!("expected the trailing literal");
    };
    assert_eq!(tail, 4);
    println!("✓ Literal/spec/literal lengths tile the template");
}
