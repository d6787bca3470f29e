use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ghermeneus::parser::tokenize_line;
use ghermeneus::{extract_instruction, extract_lines, Instruction, Line};
use std::hint::black_box;

/// Generate G-code content of different patterns for benchmarking
fn generate_gcode_content(lines: usize, pattern: &str) -> String {
    let mut content = String::new();

    match pattern {
        "movement_heavy" => {
            for i in 0..lines {
                content.push_str(&format!(
                    "G1 X{:.3} Y{:.3} Z{:.3} E{:.3} F1500\n",
                    (i as f32) * 0.1,
                    (i as f32) * 0.2,
                    (i as f32) * 0.05,
                    (i as f32) * 0.02
                ));
            }
        }
        "comment_heavy" => {
            for i in 0..lines {
                content.push_str(&format!(
                    "G1 X{:.1} Y{:.1} ; Move to position {}, layer {}\n",
                    (i as f32) * 0.1,
                    (i as f32) * 0.1,
                    i,
                    i / 100
                ));
            }
        }
        _ => {
            for i in 0..lines {
                match i % 4 {
                    0 => content.push_str(&format!(
                        "G1 X{:.3} Y{:.3} F1500\n",
                        (i as f32) * 0.1,
                        (i as f32) * 0.2
                    )),
                    1 => content.push_str(&format!("; Layer {}\n", i / 4)),
                    2 => content.push_str(&format!("M104 S{}\n", 200 + (i % 50))),
                    _ => content.push_str(&format!("G0 Z{:.2}\n", (i as f32) * 0.1)),
                }
            }
        }
    }

    content
}

/// Benchmark extracting single lines with different shapes
fn bench_single_line_extraction(c: &mut Criterion) {
    let test_lines = vec![
        ("simple_move", "G1 X10 Y20"),
        ("complex_move", "G1 X123.456 Y789.012 Z0.3 E2.85714 F1500"),
        ("with_comment", "G1 X10 Y20 ; Move to next position"),
        (
            "comment_only",
            "; This is a comment line with some detailed information",
        ),
        ("temperature", "M104 S210 T0"),
    ];

    let mut group = c.benchmark_group("single_line_extraction");

    for (name, text) in test_lines {
        let line = Line::new(0, text);
        group.bench_with_input(
            BenchmarkId::new("extract_instruction", name),
            &line,
            |b, line| b.iter(|| black_box(extract_instruction(black_box(line)))),
        );
    }

    group.finish();
}

/// Benchmark line splitting plus extraction over whole buffers
fn bench_buffer_extraction(c: &mut Criterion) {
    let file_sizes = vec![1_000, 10_000, 100_000];
    let patterns = vec!["movement_heavy", "comment_heavy", "mixed"];

    let mut group = c.benchmark_group("buffer_extraction");

    for &size in &file_sizes {
        for pattern in &patterns {
            let content = generate_gcode_content(size, pattern);

            group.throughput(Throughput::Bytes(content.len() as u64));
            group.bench_with_input(
                BenchmarkId::new(*pattern, size),
                &content,
                |b, content| {
                    b.iter(|| {
                        let instructions: Vec<Instruction<'_>> = extract_lines(content)
                            .iter()
                            .filter_map(|line| extract_instruction(line).ok().flatten())
                            .collect();
                        black_box(instructions)
                    })
                },
            );
        }
    }

    group.finish();
}

/// Benchmark tokenization performance separately
fn bench_tokenization(c: &mut Criterion) {
    let test_lines = vec![
        ("simple", "G1 X10 Y20"),
        (
            "complex",
            "G1 X123.456 Y789.012 Z0.3 E2.85714 F1500 ; Complex move",
        ),
        (
            "many_params",
            "M851 X1.23 Y-2.45 Z0.67 I1 J2 P3 S4 T5 U6 V7 W8",
        ),
    ];

    let mut group = c.benchmark_group("tokenization");

    for (name, line) in test_lines {
        group.bench_with_input(BenchmarkId::new("tokenize", name), &line, |b, line| {
            b.iter(|| black_box(tokenize_line(black_box(line)).count()))
        });
    }

    group.finish();
}

criterion_group!(
    parsing_benches,
    bench_single_line_extraction,
    bench_buffer_extraction,
    bench_tokenization
);

criterion_main!(parsing_benches);
