use declscope_core::index::SourceIndexer;
use declscope_core::model::SourceModel;
use declscope_core::parser::DeclarationParser;
use declscope_java::JavaDeclarationParser;

#[allow(dead_code)]
pub const LEDGER_SOURCE: &str = r#"package com.example.bank;

import java.util.List;

/**
 * An append-only list of entries.
 */
public class Ledger implements Comparable<Ledger> {
    private static final int LIMIT = 10, MAX = 20;
    private final List<String> entries;

    public Ledger(List<String> entries) {
        this.entries = entries;
    }

    @Override
    public int compareTo(Ledger other) {
        return Integer.compare(size(), other.size());
    }

    int size() {
        Runnable r = new Runnable() {
            public void run() {}
        };
        return entries.size();
    }

    interface Listener {
        String PREFIX = "ledger";
        void onEntry(String entry);
    }

    enum Mode {
        OPEN, CLOSED;

        boolean isOpen() {
            return this == OPEN;
        }
    }

    record Entry(String memo, long amount) {
        Entry {
            if (amount < 0) throw new IllegalArgumentException();
        }
    }

    @interface Audited {
        String value() default "";
    }
}

class Helper {
}
"#;

#[allow(dead_code)]
pub fn parse_model(source: &str) -> SourceModel {
    SourceIndexer::build(&JavaDeclarationParser::new(), source, None)
}

#[allow(dead_code)]
pub fn parser() -> JavaDeclarationParser {
    let parser = JavaDeclarationParser::new();
    assert_eq!(parser.language(), "java");
    parser
}
