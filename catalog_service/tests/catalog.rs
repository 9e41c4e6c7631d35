use std::{
    collections::HashSet,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use catalog_common::id::Id;
use catalog_service::{
    author::repository::{
        AuthorRecordInsert, AuthorRecordOwned, AuthorRepository, memory::MemoryAuthorRepository,
    },
    book::repository::{BookRecordOwned, BookRepository, memory::MemoryBookRepository},
    catalog::Catalog,
    error::{AppError, AppResult, ResourceKind},
    model::{
        author::{AuthorId, AuthorInput},
        book::{BookId, BookInput},
    },
    store::timeout::{CallClass, StoreTimeouts},
};

struct Fixture {
    catalog: Catalog,
    authors: Arc<CountingAuthorRepository>,
    books: Arc<MemoryBookRepository>,
}

impl Fixture {
    fn new() -> Self {
        Self::with_repositories(MemoryAuthorRepository::new(), MemoryBookRepository::new())
    }

    fn with_repositories(authors: MemoryAuthorRepository, books: MemoryBookRepository) -> Self {
        let authors = Arc::new(CountingAuthorRepository::new(authors));
        let books = Arc::new(books);
        Self {
            catalog: Catalog::new(authors.clone(), books.clone()),
            authors,
            books,
        }
    }

    async fn book_count(&self) -> usize {
        self.books.select_all().await.unwrap().len()
    }
}

/// Counts the calls the catalog makes to the author repository.
#[derive(Debug)]
struct CountingAuthorRepository {
    inner: MemoryAuthorRepository,
    selects: AtomicUsize,
    batch_selects: AtomicUsize,
}

impl CountingAuthorRepository {
    fn new(inner: MemoryAuthorRepository) -> Self {
        Self {
            inner,
            selects: AtomicUsize::new(0),
            batch_selects: AtomicUsize::new(0),
        }
    }

    fn reset(&self) {
        self.selects.store(0, Ordering::SeqCst);
        self.batch_selects.store(0, Ordering::SeqCst);
    }
}

#[async_trait]
impl AuthorRepository for CountingAuthorRepository {
    async fn insert(&self, record: AuthorRecordInsert) -> AppResult<AuthorId> {
        self.inner.insert(record).await
    }

    async fn select(&self, id: &AuthorId) -> AppResult<Option<AuthorRecordOwned>> {
        self.selects.fetch_add(1, Ordering::SeqCst);
        self.inner.select(id).await
    }

    async fn select_multiple(&self, ids: &[AuthorId]) -> AppResult<Vec<AuthorRecordOwned>> {
        self.batch_selects.fetch_add(1, Ordering::SeqCst);
        self.inner.select_multiple(ids).await
    }

    async fn select_all(&self) -> AppResult<Vec<AuthorRecordOwned>> {
        self.inner.select_all().await
    }
}

fn author_input(name: &str, birthdate: &str) -> AuthorInput {
    AuthorInput {
        name: name.into(),
        birthdate: birthdate.into(),
    }
}

fn book_input(title: &str, author_id: impl ToString) -> BookInput {
    BookInput {
        title: title.into(),
        author_id: author_id.to_string(),
    }
}

#[tokio::test]
async fn create_author_and_book() {
    let fixture = Fixture::new();

    let author = fixture
        .catalog
        .create_author(&author_input("Jane Doe", "15-03-1990"))
        .await
        .unwrap();
    assert!(!author.id.to_string().is_empty());
    assert_eq!(author.name, "Jane Doe");
    assert_eq!(author.birthdate, "15-03-1990");

    let book = fixture
        .catalog
        .create_book(&book_input("Go Deep", author.id))
        .await
        .unwrap();
    assert_eq!(book.title, "Go Deep");
    assert_eq!(book.author.name, "Jane Doe");
    assert_eq!(book.author, author);
}

#[tokio::test]
async fn get_author_round_trip() {
    let fixture = Fixture::new();

    for (name, birthdate) in [
        ("Jane Doe", "15-03-1990"),
        ("John Roe", "01-01-1970"),
        ("Ada Lovelace", "10-12-1815"),
        ("Leap Year", "29-02-2000"),
    ] {
        let created = fixture
            .catalog
            .create_author(&author_input(name, birthdate))
            .await
            .unwrap();

        let fetched = fixture
            .catalog
            .get_author(&created.id.to_string())
            .await
            .unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.name, name);
        assert_eq!(fetched.birthdate, birthdate);
    }

    assert_eq!(fixture.catalog.list_authors().await.unwrap().len(), 4);
}

#[tokio::test]
async fn get_author_invalid_identifier() {
    let fixture = Fixture::new();

    assert!(matches!(
        fixture.catalog.get_author("not-a-valid-id").await,
        Err(AppError::InvalidIdentifier(_))
    ));
    assert!(matches!(
        fixture.catalog.get_book("not-a-valid-id").await,
        Err(AppError::InvalidIdentifier(_))
    ));
}

#[tokio::test]
async fn get_missing() {
    let fixture = Fixture::new();
    let id = Id::generate().to_string();

    assert!(matches!(
        fixture.catalog.get_author(&id).await,
        Err(AppError::NotFound {
            kind: ResourceKind::Author,
            ..
        })
    ));
    assert!(matches!(
        fixture.catalog.get_book(&id).await,
        Err(AppError::NotFound {
            kind: ResourceKind::Book,
            ..
        })
    ));
}

#[tokio::test]
async fn create_author_invalid_input() {
    let fixture = Fixture::new();

    for birthdate in ["1990-03-15", "15/03/1990", "31-02-1990", "5-3-1990", ""] {
        assert!(matches!(
            fixture
                .catalog
                .create_author(&author_input("Jane Doe", birthdate))
                .await,
            Err(AppError::InvalidDate(date)) if date == birthdate
        ));
    }
    assert!(matches!(
        fixture
            .catalog
            .create_author(&author_input(" ", "15-03-1990"))
            .await,
        Err(AppError::InvalidArgument { field: "name" })
    ));

    assert!(fixture.catalog.list_authors().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_book_requires_author() {
    let fixture = Fixture::new();

    let missing = Id::generate();
    let err = fixture
        .catalog
        .create_book(&book_input("Go Deep", missing))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::NotFound {
            kind: ResourceKind::Author,
            id,
        } if id == missing.to_string()
    ));
    assert_eq!(fixture.book_count().await, 0);

    assert!(matches!(
        fixture
            .catalog
            .create_book(&book_input("Go Deep", "not-a-valid-id"))
            .await,
        Err(AppError::InvalidIdentifier(_))
    ));
    assert_eq!(fixture.book_count().await, 0);

    let author = fixture
        .catalog
        .create_author(&author_input("Jane Doe", "15-03-1990"))
        .await
        .unwrap();
    assert!(matches!(
        fixture
            .catalog
            .create_book(&book_input("  ", author.id))
            .await,
        Err(AppError::InvalidArgument { field: "title" })
    ));
    assert_eq!(fixture.book_count().await, 0);
}

#[tokio::test]
async fn get_book_resolves_author() {
    let fixture = Fixture::new();

    let author = fixture
        .catalog
        .create_author(&author_input("Jane Doe", "15-03-1990"))
        .await
        .unwrap();
    let created = fixture
        .catalog
        .create_book(&book_input("Go Deep", author.id))
        .await
        .unwrap();

    let book = fixture
        .catalog
        .get_book(&created.id.to_string())
        .await
        .unwrap();
    assert_eq!(book, created);
    assert_eq!(book.author.id, author.id);
    assert_eq!(book.author.birthdate, "15-03-1990");
}

#[tokio::test]
async fn list_books_by_author() {
    let fixture = Fixture::new();

    let jane = fixture
        .catalog
        .create_author(&author_input("Jane Doe", "15-03-1990"))
        .await
        .unwrap();
    let john = fixture
        .catalog
        .create_author(&author_input("John Roe", "01-01-1970"))
        .await
        .unwrap();
    let nobody = fixture
        .catalog
        .create_author(&author_input("No Books", "02-02-1902"))
        .await
        .unwrap();

    for (title, author) in [
        ("Go Deep", &jane),
        ("Go Deeper", &jane),
        ("Rust Fast", &john),
    ] {
        fixture
            .catalog
            .create_book(&book_input(title, author.id))
            .await
            .unwrap();
    }

    let all = fixture.catalog.list_books().await.unwrap();
    assert_eq!(all.len(), 3);

    for author in [&jane, &john, &nobody] {
        let by_author = fixture
            .catalog
            .list_books_by_author(&author.id.to_string())
            .await
            .unwrap();

        let expected: HashSet<BookId> = all
            .iter()
            .filter(|book| book.author.id == author.id)
            .map(|book| book.id)
            .collect();
        let actual: HashSet<BookId> = by_author.iter().map(|book| book.id).collect();
        assert_eq!(actual, expected);
        assert!(by_author.iter().all(|book| book.author == *author));
    }

    let mut titles: Vec<_> = fixture
        .catalog
        .list_books_by_author(&jane.id.to_string())
        .await
        .unwrap()
        .into_iter()
        .map(|book| book.title)
        .collect();
    titles.sort();
    assert_eq!(titles, vec!["Go Deep", "Go Deeper"]);

    assert!(
        fixture
            .catalog
            .list_books_by_author(&nobody.id.to_string())
            .await
            .unwrap()
            .is_empty()
    );
    assert!(
        fixture
            .catalog
            .list_books_by_author("not-a-valid-id")
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn list_books_resolves_authors_in_one_batch() {
    let fixture = Fixture::new();

    let mut author_ids = Vec::new();
    for i in 0..3 {
        let author = fixture
            .catalog
            .create_author(&author_input(&format!("Author {i}"), "15-03-1990"))
            .await
            .unwrap();
        author_ids.push(author.id);
    }
    for i in 0..12 {
        fixture
            .catalog
            .create_book(&book_input(&format!("Book {i}"), author_ids[i % 3]))
            .await
            .unwrap();
    }

    fixture.authors.reset();
    let books = fixture.catalog.list_books().await.unwrap();

    assert_eq!(books.len(), 12);
    assert_eq!(fixture.authors.batch_selects.load(Ordering::SeqCst), 1);
    assert_eq!(fixture.authors.selects.load(Ordering::SeqCst), 0);
    for book in &books {
        let index: usize = book.title["Book ".len()..].parse().unwrap();
        assert_eq!(book.author.id, author_ids[index % 3]);
    }
}

#[tokio::test]
async fn list_books_empty() {
    let fixture = Fixture::new();

    assert!(fixture.catalog.list_books().await.unwrap().is_empty());
    assert_eq!(fixture.authors.batch_selects.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn list_books_fails_on_orphan() {
    let missing = AuthorId::new(Id::generate());
    let fixture = Fixture::with_repositories(
        MemoryAuthorRepository::new(),
        MemoryBookRepository::with_data(vec![BookRecordOwned {
            id: BookId::new(Id::generate()),
            author_id: missing.to_string(),
            title: "Orphan".into(),
        }]),
    );
    let author = fixture
        .catalog
        .create_author(&author_input("Jane Doe", "15-03-1990"))
        .await
        .unwrap();
    fixture
        .catalog
        .create_book(&book_input("Go Deep", author.id))
        .await
        .unwrap();

    assert!(matches!(
        fixture.catalog.list_books().await,
        Err(AppError::NotFound {
            kind: ResourceKind::Author,
            id,
        }) if id == missing.to_string()
    ));
    assert!(matches!(
        fixture
            .catalog
            .list_books_by_author(&author.id.to_string())
            .await,
        Err(AppError::NotFound { .. })
    ));
    assert!(matches!(
        fixture.catalog.list_books_by_author("not-a-valid-id").await,
        Err(AppError::NotFound {
            kind: ResourceKind::Author,
            ..
        })
    ));
}

#[tokio::test(start_paused = true)]
async fn list_books_by_author_reports_scan_timeout() {
    let fixture = Fixture::with_repositories(
        MemoryAuthorRepository::new(),
        MemoryBookRepository::new().with_latency(Duration::from_secs(31)),
    );

    for author_id in [Id::generate().to_string(), "not-a-valid-id".to_string()] {
        assert!(matches!(
            fixture.catalog.list_books_by_author(&author_id).await,
            Err(AppError::StoreTimeout {
                class: CallClass::Scan,
                ..
            })
        ));
    }
}

#[tokio::test]
async fn malformed_stored_author_reference() {
    let book_id = BookId::new(Id::generate());
    let fixture = Fixture::with_repositories(
        MemoryAuthorRepository::new(),
        MemoryBookRepository::with_data(vec![BookRecordOwned {
            id: book_id,
            author_id: "garbage".into(),
            title: "Broken".into(),
        }]),
    );

    assert!(matches!(
        fixture.catalog.get_book(&book_id.to_string()).await,
        Err(AppError::InvalidIdentifier(_))
    ));
    assert!(matches!(
        fixture.catalog.list_books().await,
        Err(AppError::InvalidIdentifier(_))
    ));
}

#[tokio::test(start_paused = true)]
async fn slow_store_times_out() {
    let latency = Duration::from_secs(6);
    let fixture = Fixture::with_repositories(
        MemoryAuthorRepository::new().with_latency(latency),
        MemoryBookRepository::new().with_latency(latency),
    );

    let err = fixture
        .catalog
        .create_author(&author_input("Jane Doe", "15-03-1990"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::StoreTimeout {
            class: CallClass::Point,
            after,
        } if after == StoreTimeouts::default().point
    ));

    // Scans get the long deadline and complete.
    assert!(fixture.catalog.list_authors().await.unwrap().is_empty());
    assert!(fixture.catalog.list_books().await.unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn custom_deadlines() {
    let timeouts = StoreTimeouts {
        connect: Duration::from_secs(1),
        point: Duration::from_millis(100),
        scan: Duration::from_millis(200),
    };
    let fixture = Fixture::with_repositories(
        MemoryAuthorRepository::new()
            .with_timeouts(timeouts)
            .with_latency(Duration::from_millis(300)),
        MemoryBookRepository::new().with_timeouts(timeouts),
    );

    assert!(matches!(
        fixture.catalog.list_authors().await,
        Err(AppError::StoreTimeout {
            class: CallClass::Scan,
            ..
        })
    ));
    assert!(matches!(
        fixture.catalog.get_author(&Id::generate().to_string()).await,
        Err(AppError::StoreTimeout {
            class: CallClass::Point,
            ..
        })
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_calls() {
    let catalog = Catalog::in_memory(StoreTimeouts::default());

    let handles: Vec<_> = (0..32)
        .map(|i| {
            let catalog = catalog.clone();
            tokio::spawn(async move {
                let author = catalog
                    .create_author(&author_input(&format!("Author {i}"), "15-03-1990"))
                    .await?;
                let book = catalog
                    .create_book(&book_input(&format!("Book {i}"), author.id))
                    .await?;
                Ok::<_, AppError>(book)
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let authors = catalog.list_authors().await.unwrap();
    let books = catalog.list_books().await.unwrap();
    assert_eq!(authors.len(), 32);
    assert_eq!(books.len(), 32);
    assert!(
        books
            .iter()
            .all(|book| book.title["Book ".len()..] == book.author.name["Author ".len()..])
    );
}
